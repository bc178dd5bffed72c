use std::io::Cursor;

use chiptally_game::{PlayerId, Snapshot, SnapshotStore};
use chiptally_terminal::settings::{Settings, Storage};
use chiptally_terminal::store::FileStore;
use chiptally_terminal::{run, Stats};

fn settings_in(dir: &tempfile::TempDir) -> Settings {
    Settings {
        storage: Storage {
            path: dir
                .path()
                .join("state.json")
                .to_string_lossy()
                .into_owned(),
        },
        ..Settings::default()
    }
}

fn play(settings: Settings, script: &str) -> (Stats, String) {
    let mut out = Vec::new();
    let stats = run(settings, Cursor::new(script.to_owned()), &mut out).expect("session to run");
    (stats, String::from_utf8(out).expect("utf-8 output"))
}

fn saved(dir: &tempfile::TempDir) -> Snapshot {
    let store = FileStore::new(dir.path().join("state.json"));
    let text = store.load().unwrap().expect("state to be saved");
    Snapshot::from_json(&text).unwrap()
}

// Ensure that:
//
// - a game can be set up through the two-step form.
// - a full round can be played and settled.
// - the file holds the settled state afterwards.
// - a second session resumes where the first one left off.
#[test]
fn scripted_round_is_saved_and_resumed() {
    let dir = tempfile::tempdir().unwrap();
    let script = "\
players 2
name 1 Ann
name 2 Bo
start
raise 1
raise 2
open
open
open
winner 1
finalize
quit
";
    let (stats, out) = play(settings_in(&dir), script);
    assert_eq!(stats.rounds_finalized, 1);
    assert_eq!(stats.commands_executed, 11);
    assert!(out.contains("Round 1 settled: Ann wins 100 points."), "{}", out);

    let snapshot = saved(&dir);
    let players = snapshot.players.unwrap();
    assert_eq!(players[0].total_points, 1100);
    assert_eq!(players[1].total_points, 900);
    assert_eq!(snapshot.round, Some(2));

    let (stats, out) = play(settings_in(&dir), "history\nshow\n");
    assert_eq!(stats.commands_executed, 0);
    assert!(out.contains("Round 1, Winner: Ann"), "{}", out);
    assert!(out.contains("Round 2 (pre-bet)"), "{}", out);
}

#[test]
fn errors_are_reported_and_the_loop_continues() {
    let dir = tempfile::tempdir().unwrap();
    let script = "\
players 1
fold
setup Ann Bo
bet 1 100
open
finalize
winner 1
";
    let (stats, out) = play(settings_in(&dir), script);
    assert!(out.contains("at least 2"), "{}", out);
    assert!(out.contains("unknown command \"fold\""), "{}", out);
    assert!(out.contains("all bets must be equal"), "{}", out);
    assert!(out.contains("a winner must be selected"), "{}", out);
    assert!(out.contains("only 0 of 5 cards are open"), "{}", out);
    assert_eq!(stats.commands_executed, 2);
    assert_eq!(saved(&dir).bets.unwrap().get(PlayerId(1)), 100);
}

#[test]
fn reset_asks_first() {
    let dir = tempfile::tempdir().unwrap();
    play(settings_in(&dir), "setup Ann Bo\n");

    let (_, out) = play(settings_in(&dir), "reset\nn\n");
    assert!(out.contains("Reset cancelled."), "{}", out);
    assert_eq!(saved(&dir).setup_completed, Some(true));

    let (_, out) = play(settings_in(&dir), "reset\ny\n");
    assert!(out.contains("Cleared saved data."), "{}", out);
    assert!(!dir.path().join("state.json").exists());
}
