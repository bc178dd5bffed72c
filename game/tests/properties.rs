use proptest::prelude::*;

use chiptally_game::{MemoryStore, PlayerId, RoundTracker, Settings};

fn tracker(players: usize) -> RoundTracker<MemoryStore> {
    let mut t = RoundTracker::open(Settings::default(), MemoryStore::new());
    let names = vec![String::new(); players];
    t.configure_players(players, &names).unwrap();
    t
}

proptest! {
    #[test]
    fn wagers_stay_within_bounds(
        deltas in prop::collection::vec(
            (1u32..=4, prop_oneof![-1500i64..1500, any::<i64>()]),
            0..60,
        ),
    ) {
        let mut t = tracker(4);
        for (id, delta) in deltas {
            let id = PlayerId(id);
            t.adjust_wager(id, delta).unwrap();
            let s = t.session();
            for p in &s.players {
                let w = s.bets.get(p.id);
                prop_assert!(w >= 0);
                prop_assert!(w <= p.total_points);
            }
        }
    }

    #[test]
    fn settlement_conserves_points(
        rounds in prop::collection::vec(
            (prop::collection::vec(0i64..=10, 3), 1u32..=3),
            1..8,
        ),
    ) {
        let mut t = tracker(3);
        let total = t.session().total_points();
        for (steps, winner) in rounds {
            for _ in 0..3 {
                t.advance_reveal().unwrap();
            }
            for (i, n) in steps.iter().enumerate() {
                t.adjust_wager(PlayerId(i as u32 + 1), n * 100).unwrap();
            }
            t.select_winner(PlayerId(winner)).unwrap();
            t.finalize_round().unwrap();
            prop_assert_eq!(t.session().total_points(), total);
            prop_assert!(t.session().players.iter().all(|p| p.total_points >= 0));
        }
    }
}
