use anyhow::{anyhow, Result};
use log::warn;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use chiptally_game::{SnapshotStore, SNAPSHOT_KEY};

/// Keeps the snapshot in the browser's `localStorage`.
///
/// When storage is unavailable (e.g. disabled by privacy settings) every
/// call fails, and the game carries on in memory only.
pub struct LocalStore {
    storage: Option<Storage>,
    key: String,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::with_key(SNAPSHOT_KEY)
    }

    pub fn with_key<K: Into<String>>(key: K) -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage is unavailable; the game will not be saved");
        }
        LocalStore {
            storage,
            key: key.into(),
        }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| anyhow!("localStorage is unavailable"))
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for LocalStore {
    fn save(&mut self, snapshot: &str) -> Result<()> {
        self.storage()?
            .set_item(&self.key, snapshot)
            .map_err(js_error)
    }

    fn load(&self) -> Result<Option<String>> {
        self.storage()?.get_item(&self.key).map_err(js_error)
    }

    fn clear(&mut self) -> Result<()> {
        self.storage()?.remove_item(&self.key).map_err(js_error)
    }
}

fn js_error(v: JsValue) -> anyhow::Error {
    anyhow!("storage error: {:?}", v)
}
