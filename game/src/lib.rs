#![warn(rust_2018_idioms)]

pub mod command;
pub mod model;
pub mod snapshot;
pub mod tracker;

pub use command::{Command, Outcome};
pub use model::{CardPosition, Player, PlayerId, Points, RevealStage, RoundHistoryEntry, Wagers};
pub use snapshot::{MemoryStore, Snapshot, SnapshotStore, SNAPSHOT_KEY};
pub use tracker::{Error, RoundTracker, Session, Settings};
