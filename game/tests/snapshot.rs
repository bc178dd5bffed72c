use chiptally_game::tracker::Error;
use chiptally_game::{
    MemoryStore, PlayerId, RevealStage, RoundTracker, Settings, Snapshot, SnapshotStore,
};

fn played_tracker() -> RoundTracker<MemoryStore> {
    let mut t = RoundTracker::open(Settings::default(), MemoryStore::new());
    t.configure_players(3, &["Ann".into(), "Bo".into(), "".into()])
        .unwrap();
    t.adjust_wager(PlayerId(1), 300).unwrap();
    t.adjust_wager(PlayerId(2), 300).unwrap();
    t.adjust_wager(PlayerId(3), 300).unwrap();
    for _ in 0..3 {
        t.advance_reveal().unwrap();
    }
    t.select_winner(PlayerId(3)).unwrap();
    t.finalize_round().unwrap();
    t.adjust_wager(PlayerId(1), 100).unwrap();
    t
}

#[test]
fn reopened_tracker_restores_the_session() {
    let t = played_tracker();
    let store = MemoryStore::with_contents(t.store().contents().unwrap());
    let restored = RoundTracker::open(Settings::default(), store);
    assert_eq!(restored.session(), t.session());
}

#[test]
fn mid_round_state_survives_reload() {
    let mut t = played_tracker();
    t.adjust_wager(PlayerId(2), 100).unwrap();
    t.adjust_wager(PlayerId(3), 100).unwrap();
    for _ in 0..3 {
        t.advance_reveal().unwrap();
    }
    t.select_winner(PlayerId(1)).unwrap();

    let store = MemoryStore::with_contents(t.store().contents().unwrap());
    let mut restored = RoundTracker::open(Settings::default(), store);
    assert_eq!(restored.stage(), RevealStage::River);
    assert_eq!(restored.session().winner_id, Some(PlayerId(1)));
    let entry = restored.finalize_round().unwrap();
    assert_eq!(entry.round, 2);
    assert_eq!(entry.pot(), 200);
}

#[test]
fn snapshot_uses_the_documented_field_names() {
    let t = played_tracker();
    let value: serde_json::Value =
        serde_json::from_str(t.store().contents().unwrap()).unwrap();
    for key in &[
        "numPlayers",
        "playerNames",
        "players",
        "setupCompleted",
        "round",
        "bets",
        "roundHistory",
        "winnerId",
        "cardOpened",
        "bettingStage",
    ] {
        assert!(value.get(*key).is_some(), "missing {}", key);
    }
    assert_eq!(value["bets"]["1"], 100);
    assert_eq!(value["players"][2]["totalPoints"], 1600);
    assert_eq!(value["roundHistory"][0]["cardOpened"][4], 5);
    assert_eq!(value["bettingStage"], 0);
}

#[test]
fn partial_snapshot_fills_in_defaults() {
    let text = r#"{
        "players": [
            {"id": 1, "name": "Ann", "totalPoints": 700},
            {"id": 2, "name": "Bo", "totalPoints": 1300}
        ],
        "setupCompleted": true,
        "bets": {"1": 0, "2": 0}
    }"#;
    let t = RoundTracker::open(Settings::default(), MemoryStore::with_contents(text));
    let s = t.session();
    assert!(s.setup_completed);
    assert_eq!(s.players.len(), 2);
    assert_eq!(s.player(PlayerId(2)).unwrap().total_points, 1300);
    assert_eq!(s.round, 1);
    assert_eq!(s.stage, RevealStage::PreBet);
    assert!(s.round_history.is_empty());
    assert!(t.can_advance_reveal());
}

#[test]
fn mistyped_fields_are_skipped() {
    let text = r#"{
        "numPlayers": "2",
        "round": "seven",
        "bettingStage": 9,
        "winnerId": null,
        "cardOpened": [1, 2, 3],
        "roundHistory": [{"round": 1, "bets": {"1": 5}, "winnerId": 1, "cardsRevealed": [1,2,3,4,5]}]
    }"#;
    let snapshot = Snapshot::from_json(text).unwrap();
    assert_eq!(snapshot.num_players, Some(2));
    assert_eq!(snapshot.round, None);
    assert_eq!(snapshot.betting_stage, None);
    assert_eq!(snapshot.winner_id, None);
    assert_eq!(snapshot.card_opened, Some(vec![1, 2, 3]));
    let history = snapshot.round_history.unwrap();
    assert_eq!(history[0].cards_revealed.len(), 5);
}

#[test]
fn corrupt_snapshot_starts_fresh() {
    for text in &["{not json", "[1, 2, 3]", "\"hello\""] {
        let t = RoundTracker::open(Settings::default(), MemoryStore::with_contents(*text));
        assert!(!t.session().setup_completed);
        assert_eq!(t.session().round, 1);
    }
}

const STRAY_ROUND: &str = r#"{
    "numPlayers": 2,
    "playerNames": ["Ann", "Bo"],
    "players": [
        {"id": 1, "name": "Ann", "totalPoints": 1000},
        {"id": 2, "name": "Bo", "totalPoints": 1000}
    ],
    "setupCompleted": true,
    "round": 4,
    "bets": {"1": 100, "2": 200, "9": 500},
    "roundHistory": [],
    "winnerId": 1,
    "cardOpened": [1, 2, 3, 4, 5],
    "bettingStage": 3
}"#;

#[test]
fn wagers_off_the_roster_are_not_paid_out() {
    let mut t = RoundTracker::open(Settings::default(), MemoryStore::with_contents(STRAY_ROUND));
    let entry = t.finalize_round().unwrap();
    let s = t.session();
    assert_eq!(s.player(PlayerId(1)).unwrap().total_points, 1200);
    assert_eq!(s.player(PlayerId(2)).unwrap().total_points, 800);
    assert_eq!(s.total_points(), 2000);
    assert_eq!(entry.pot(), 200);
    assert_eq!(entry.bets.get(PlayerId(9)), 0);
}

#[test]
fn unknown_saved_winner_cannot_settle() {
    let text = STRAY_ROUND.replace(r#""winnerId": 1"#, r#""winnerId": 9"#);
    let mut t = RoundTracker::open(Settings::default(), MemoryStore::with_contents(text));
    let before = t.session().clone();
    assert!(matches!(
        t.finalize_round(),
        Err(Error::Validation { .. })
    ));
    assert_eq!(t.session(), &before);
}

struct BrokenStore;

impl SnapshotStore for BrokenStore {
    fn save(&mut self, _: &str) -> anyhow::Result<()> {
        anyhow::bail!("storage unavailable")
    }

    fn load(&self) -> anyhow::Result<Option<String>> {
        anyhow::bail!("storage unavailable")
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        anyhow::bail!("storage unavailable")
    }
}

#[test]
fn unavailable_storage_keeps_the_session_in_memory() {
    let mut t = RoundTracker::open(Settings::default(), BrokenStore);
    t.configure_players(2, &["A".into(), "B".into()]).unwrap();
    t.adjust_wager(PlayerId(1), 100).unwrap();
    assert_eq!(t.session().bets.get(PlayerId(1)), 100);
    t.reset_session();
    assert!(!t.session().setup_completed);
}
