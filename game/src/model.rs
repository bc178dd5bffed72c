use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Points are represented as discreet, indivisible units.
pub type Points = i64;

/// Position of a community card on the board, counted from 1.
pub type CardPosition = u8;

/// The number of community cards dealt over a full round.
pub const BOARD_SIZE: usize = 5;

/// Sequential identifier assigned to each player at setup, starting at 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub total_points: Points,
}

impl Player {
    /// Create a player from a raw name, falling back to "Player N" if the name
    /// is blank.
    pub fn new(id: PlayerId, name: &str, total_points: Points) -> Self {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            format!("Player {}", id)
        } else {
            trimmed.to_owned()
        };
        Player {
            id,
            name,
            total_points,
        }
    }
}

/// The current round's wager of every player.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Wagers(BTreeMap<PlayerId, Points>);

impl Wagers {
    /// A zero wager for each of the given players.
    pub fn zeroed<'a, I>(players: I) -> Self
    where
        I: IntoIterator<Item = &'a Player>,
    {
        Wagers(players.into_iter().map(|p| (p.id, 0)).collect())
    }

    /// The wager of a player, treating a missing entry as zero.
    pub fn get(&self, id: PlayerId) -> Points {
        self.0.get(&id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, id: PlayerId, amount: Points) {
        self.0.insert(id, amount);
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, Points)> + '_ {
        self.0.iter().map(|(&id, &amount)| (id, amount))
    }

    /// The wagers of the given players only, missing entries as zero.
    pub fn for_players<'a, I>(&self, players: I) -> Self
    where
        I: IntoIterator<Item = &'a Player>,
    {
        Wagers(players.into_iter().map(|p| (p.id, self.get(p.id))).collect())
    }

    /// Whether every wager holds the same amount. Vacuously true for zero or
    /// one entries.
    pub fn all_equal(&self) -> bool {
        let mut amounts = self.0.values();
        match amounts.next() {
            Some(first) => amounts.all(|a| a == first),
            None => true,
        }
    }

    /// Sum of every wager except the given player's.
    pub fn total_except(&self, id: PlayerId) -> Points {
        self.iter()
            .filter(|&(p, _)| p != id)
            .map(|(_, amount)| amount)
            .sum()
    }
}

/// How far the community cards have been revealed this round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RevealStage {
    PreBet = 0,
    Flop = 1,
    Turn = 2,
    River = 3,
}

impl RevealStage {
    /// The number of community cards visible once this stage is reached.
    pub const fn cards_revealed(&self) -> usize {
        match self {
            RevealStage::PreBet => 0,
            RevealStage::Flop => 3,
            RevealStage::Turn => 4,
            RevealStage::River => BOARD_SIZE,
        }
    }

    /// The following stage, or `None` at the river.
    pub const fn next(&self) -> Option<Self> {
        match self {
            RevealStage::PreBet => Some(RevealStage::Flop),
            RevealStage::Flop => Some(RevealStage::Turn),
            RevealStage::Turn => Some(RevealStage::River),
            RevealStage::River => None,
        }
    }

    /// Card positions that become visible when advancing into this stage.
    pub fn dealt_on_entry(&self) -> std::ops::RangeInclusive<CardPosition> {
        let end = self.cards_revealed() as CardPosition;
        let start = match self.previous() {
            Some(prev) => prev.cards_revealed() as CardPosition + 1,
            None => 1,
        };
        start..=end
    }

    const fn previous(&self) -> Option<Self> {
        match self {
            RevealStage::PreBet => None,
            RevealStage::Flop => Some(RevealStage::PreBet),
            RevealStage::Turn => Some(RevealStage::Flop),
            RevealStage::River => Some(RevealStage::Turn),
        }
    }
}

impl Default for RevealStage {
    fn default() -> Self {
        RevealStage::PreBet
    }
}

impl From<RevealStage> for u8 {
    fn from(stage: RevealStage) -> u8 {
        stage as u8
    }
}

impl TryFrom<u8> for RevealStage {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(RevealStage::PreBet),
            1 => Ok(RevealStage::Flop),
            2 => Ok(RevealStage::Turn),
            3 => Ok(RevealStage::River),
            _ => Err(format!("no betting stage {}", n)),
        }
    }
}

impl fmt::Display for RevealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevealStage::PreBet => write!(f, "pre-bet"),
            RevealStage::Flop => write!(f, "flop"),
            RevealStage::Turn => write!(f, "turn"),
            RevealStage::River => write!(f, "river"),
        }
    }
}

/// A settled round, as recorded in the history.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundHistoryEntry {
    pub round: u32,
    pub bets: Wagers,
    pub winner_id: PlayerId,
    #[serde(rename = "cardOpened", alias = "cardsRevealed")]
    pub cards_revealed: Vec<CardPosition>,
}

impl RoundHistoryEntry {
    /// Points the winner collected in this round.
    pub fn pot(&self) -> Points {
        self.bets.total_except(self.winner_id)
    }
}
