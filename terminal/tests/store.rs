use chiptally_game::SnapshotStore;
use chiptally_terminal::store::FileStore;

#[test]
fn missing_file_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent.json"));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn saves_replace_earlier_ones() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("state.json"));
    store.save("{\"round\":1}").unwrap();
    store.save("{\"round\":2}").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("{\"round\":2}"));
    assert!(!dir.path().join("state.json.tmp").exists());
}

#[test]
fn clear_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("state.json"));
    store.save("{}").unwrap();
    store.clear().unwrap();
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn unwritable_location_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("missing").join("state.json"));
    assert!(store.save("{}").is_err());
}
