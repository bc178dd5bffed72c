//! Tests that need a browser: `wasm-pack test --headless --firefox ui`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use chiptally_game::{PlayerId, RoundTracker, Settings, SnapshotStore};
use chiptally_ui::store::LocalStore;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_store_keeps_the_latest_snapshot() {
    let mut store = LocalStore::with_key("chiptally-test-store");
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    store.save("{\"round\":3}").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("{\"round\":3}"));
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[wasm_bindgen_test]
fn game_survives_a_reload() {
    const KEY: &str = "chiptally-test-reload";
    let mut t = RoundTracker::open(Settings::default(), LocalStore::with_key(KEY));
    t.reset_session();
    t.configure_players(2, &["Ann".into(), "Bo".into()]).unwrap();
    t.adjust_wager(PlayerId(2), 100).unwrap();

    let reloaded = RoundTracker::open(Settings::default(), LocalStore::with_key(KEY));
    assert_eq!(reloaded.session(), t.session());
    t.reset_session();
}
