use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use chiptally_game::SnapshotStore;

/// Keeps the snapshot in a single file.
///
/// Saves are written to a sibling file first and renamed into place, so an
/// interrupted save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scratch_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, snapshot: &str) -> Result<()> {
        let scratch = self.scratch_path();
        fs::write(&scratch, snapshot)
            .with_context(|| format!("writing {}", scratch.display()))?;
        fs::rename(&scratch, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        debug!("saved {} bytes to {}", snapshot.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                Err(e).with_context(|| format!("removing {}", self.path.display()))
            }
            _ => Ok(()),
        }
    }
}
