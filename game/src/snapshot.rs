//! Durable copies of a session.
//!
//! A `Snapshot` is the whole session written as a single JSON object. Stores
//! only ever see the encoded text; decoding is lenient per field, so a
//! snapshot written by an older build (or damaged by hand) still restores
//! whatever it can.

use anyhow::Result;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{CardPosition, Player, PlayerId, RevealStage, RoundHistoryEntry, Wagers};

/// The name under which the snapshot is kept in key-value stores.
pub const SNAPSHOT_KEY: &str = "poker-point-tracker-state";

/// Persistent record of every session field. Absent fields leave the
/// corresponding session default untouched when restored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub num_players: Option<u32>,
    pub player_names: Option<Vec<String>>,
    pub players: Option<Vec<Player>>,
    pub setup_completed: Option<bool>,
    pub round: Option<u32>,
    pub bets: Option<Wagers>,
    pub round_history: Option<Vec<RoundHistoryEntry>>,
    pub winner_id: Option<PlayerId>,
    pub card_opened: Option<Vec<CardPosition>>,
    pub betting_stage: Option<RevealStage>,
}

// The setup form once stored the raw text of the player count field.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlayerCount {
    Number(u32),
    Text(String),
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a snapshot, keeping every field that is present and well-typed.
    ///
    /// Only text which is not a JSON object at all is an error.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let obj = match value {
            Value::Object(obj) => obj,
            other => anyhow::bail!("snapshot is not an object: {}", kind(&other)),
        };
        let num_players = field::<PlayerCount>(&obj, "numPlayers").and_then(|c| match c {
            PlayerCount::Number(n) => Some(n),
            PlayerCount::Text(s) if s.trim().is_empty() => None,
            PlayerCount::Text(s) => s
                .trim()
                .parse()
                .map_err(|e| warn!("ignoring snapshot field numPlayers: {}", e))
                .ok(),
        });
        Ok(Snapshot {
            num_players,
            player_names: field(&obj, "playerNames"),
            players: field(&obj, "players"),
            setup_completed: field(&obj, "setupCompleted"),
            round: field(&obj, "round"),
            bets: field(&obj, "bets"),
            round_history: field(&obj, "roundHistory"),
            winner_id: field(&obj, "winnerId"),
            card_opened: field(&obj, "cardOpened"),
            betting_stage: field(&obj, "bettingStage"),
        })
    }
}

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| warn!("ignoring snapshot field {}: {}", key, e))
            .ok(),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Somewhere to keep the encoded snapshot between runs.
///
/// The store treats the snapshot as opaque text.
pub trait SnapshotStore {
    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &str) -> Result<()>;

    /// Fetch the stored snapshot, if there is one.
    fn load(&self) -> Result<Option<String>>;

    /// Forget the stored snapshot.
    fn clear(&mut self) -> Result<()>;
}

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store which already holds the given text.
    pub fn with_contents<S: Into<String>>(contents: S) -> Self {
        MemoryStore {
            contents: Some(contents.into()),
            saves: 0,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// How many times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &str) -> Result<()> {
        self.contents = Some(snapshot.to_owned());
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.contents = None;
        Ok(())
    }
}
