//! The round-settlement state machine.

use log::{debug, error, info, warn};
use serde::Deserialize;
use snafu::{ensure, OptionExt, Snafu};

use crate::model::{
    CardPosition, Player, PlayerId, Points, RevealStage, RoundHistoryEntry, Wagers,
};
use crate::snapshot::{Snapshot, SnapshotStore};

/// The fewest players a game may be set up with.
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Eq, PartialEq, Snafu)]
pub enum Error {
    /// Bad setup input or an unknown player.
    #[snafu(display("{}", reason))]
    Validation { reason: String },

    /// An operation attempted out of turn.
    #[snafu(display("cannot {}: {}", action, reason))]
    InvalidTransition {
        action: &'static str,
        reason: String,
    },

    #[snafu(display("a winner must be selected before finalizing the round"))]
    MissingWinner,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Points every player starts with.
    pub starting_points: Points,
    /// Amount a single raise or lower moves a wager by.
    pub wager_step: Points,
    /// How many past rounds front-ends list.
    pub history_window: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            starting_points: 1000,
            wager_step: 100,
            history_window: 5,
        }
    }
}

/// Everything known about the game in progress.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Session {
    pub num_players: Option<u32>,
    pub player_names: Vec<String>,
    pub players: Vec<Player>,
    pub setup_completed: bool,
    pub round: u32,
    pub bets: Wagers,
    pub round_history: Vec<RoundHistoryEntry>,
    pub winner_id: Option<PlayerId>,
    pub cards_revealed: Vec<CardPosition>,
    pub stage: RevealStage,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            num_players: None,
            player_names: vec![],
            players: vec![],
            setup_completed: false,
            round: 1,
            bets: Wagers::default(),
            round_history: vec![],
            winner_id: None,
            cards_revealed: vec![],
            stage: RevealStage::PreBet,
        }
    }
}

impl Session {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Sum of every player's points.
    pub fn total_points(&self) -> Points {
        self.players.iter().map(|p| p.total_points).sum()
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            num_players: self.num_players,
            player_names: Some(self.player_names.clone()),
            players: Some(self.players.clone()),
            setup_completed: Some(self.setup_completed),
            round: Some(self.round),
            bets: Some(self.bets.clone()),
            round_history: Some(self.round_history.clone()),
            winner_id: self.winner_id,
            card_opened: Some(self.cards_revealed.clone()),
            betting_stage: Some(self.stage),
        }
    }

    /// Take on every field present in the snapshot.
    pub fn adopt(&mut self, s: Snapshot) {
        if let Some(n) = s.num_players {
            self.num_players = Some(n);
        }
        if let Some(names) = s.player_names {
            self.player_names = names;
        }
        if let Some(players) = s.players {
            self.players = players;
        }
        if let Some(done) = s.setup_completed {
            self.setup_completed = done;
        }
        if let Some(round) = s.round {
            self.round = round;
        }
        if let Some(bets) = s.bets {
            self.bets = bets;
        }
        if let Some(history) = s.round_history {
            self.round_history = history;
        }
        if let Some(id) = s.winner_id {
            self.winner_id = Some(id);
        }
        if let Some(cards) = s.card_opened {
            self.cards_revealed = cards;
        }
        if let Some(stage) = s.betting_stage {
            self.stage = stage;
        }
    }
}

/// Owns a session and keeps its persisted copy up to date.
///
/// Every mutating operation either fails without touching the session, or
/// applies completely and then saves the whole session to the store.
pub struct RoundTracker<S> {
    settings: Settings,
    session: Session,
    store: S,
}

impl<S: SnapshotStore> RoundTracker<S> {
    /// Create a tracker, restoring whatever session the store holds.
    ///
    /// A missing, unreadable or malformed snapshot leaves a fresh session.
    pub fn open(settings: Settings, store: S) -> Self {
        let mut session = Session::default();
        match store.load() {
            Ok(Some(text)) => match Snapshot::from_json(&text) {
                Ok(snapshot) => {
                    session.adopt(snapshot);
                    if let Some(id) = session.winner_id {
                        if session.player(id).is_none() {
                            warn!("saved winner {} is not one of the players", id);
                        }
                    }
                    info!(
                        "restored session at round {} with {} players",
                        session.round,
                        session.players.len()
                    );
                }
                Err(e) => warn!("failed to load saved game state: {}", e),
            },
            Ok(None) => debug!("no saved game state"),
            Err(e) => warn!("failed to read saved game state: {}", e),
        }
        RoundTracker {
            settings,
            session,
            store,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stage(&self) -> RevealStage {
        self.session.stage
    }

    /// Set up a new game with one player per name.
    pub fn configure_players(&mut self, count: usize, names: &[String]) -> Result<&Session> {
        ensure!(
            count >= MIN_PLAYERS,
            Validation {
                reason: format!(
                    "need at least {} players, got {}",
                    MIN_PLAYERS, count
                ),
            }
        );
        ensure!(
            names.len() == count,
            Validation {
                reason: format!("expected {} player names, got {}", count, names.len()),
            }
        );
        let starting_points = self.settings.starting_points;
        let players: Vec<Player> = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId(i as u32 + 1), name, starting_points))
            .collect();
        let bets = Wagers::zeroed(&players);
        self.session = Session {
            num_players: Some(count as u32),
            player_names: names.to_vec(),
            players,
            setup_completed: true,
            bets,
            ..Session::default()
        };
        info!("started game with {} players", count);
        self.persist();
        Ok(&self.session)
    }

    /// Accept the player count typed into the setup form and open one name
    /// slot per player.
    pub fn begin_setup(&mut self, count_input: &str) -> Result<&[String]> {
        self.ensure_not_started("begin setup")?;
        let count: usize = count_input.trim().parse().ok().context(Validation {
            reason: format!("{:?} is not a valid number of players", count_input.trim()),
        })?;
        ensure!(
            count >= MIN_PLAYERS,
            Validation {
                reason: format!(
                    "please enter a valid number of players (at least {})",
                    MIN_PLAYERS
                ),
            }
        );
        self.session.num_players = Some(count as u32);
        self.session.player_names = vec![String::new(); count];
        self.persist();
        Ok(&self.session.player_names)
    }

    /// Fill in one slot of the setup form.
    pub fn set_player_name(&mut self, index: usize, name: &str) -> Result<()> {
        self.ensure_not_started("rename a player")?;
        let slots = self.session.player_names.len();
        let slot = self
            .session
            .player_names
            .get_mut(index)
            .context(Validation {
                reason: format!("no name slot {} (have {})", index + 1, slots),
            })?;
        *slot = name.to_owned();
        self.persist();
        Ok(())
    }

    /// Finish the setup form, creating the players it names.
    pub fn start_game(&mut self) -> Result<&Session> {
        self.ensure_not_started("start the game")?;
        let count = self.session.num_players.context(Validation {
            reason: "enter the number of players first",
        })? as usize;
        let names = self.session.player_names.clone();
        self.configure_players(count, &names)
    }

    /// Move a player's wager by `delta`, never below zero.
    ///
    /// An adjustment that would take the wager beyond the player's points is
    /// silently dropped. The returned bool says whether it was applied.
    pub fn adjust_wager(&mut self, id: PlayerId, delta: Points) -> Result<(&Wagers, bool)> {
        self.ensure_started("adjust a wager")?;
        let total = self.player(id)?.total_points;
        let amount = self.session.bets.get(id).saturating_add(delta).max(0);
        if amount > total {
            debug!(
                "ignoring wager of {} for player {} holding {}",
                amount, id, total
            );
            return Ok((&self.session.bets, false));
        }
        self.session.bets.set(id, amount);
        self.persist();
        Ok((&self.session.bets, true))
    }

    /// Whether one more wager step for this player would be accepted.
    pub fn can_raise(&self, id: PlayerId, step: Points) -> bool {
        self.session
            .player(id)
            .map_or(false, |p| {
                p.total_points >= self.session.bets.get(id).saturating_add(step)
            })
    }

    /// Whether this player has anything wagered to take back.
    pub fn can_lower(&self, id: PlayerId) -> bool {
        self.session.bets.get(id) > 0
    }

    /// Before the flop every wager must match; after it, cards may be opened
    /// freely until the river.
    pub fn can_advance_reveal(&self) -> bool {
        if !self.session.setup_completed {
            return false;
        }
        match self.session.stage {
            RevealStage::PreBet => self.session.bets.all_equal(),
            RevealStage::Flop | RevealStage::Turn => true,
            RevealStage::River => false,
        }
    }

    /// Open the next community cards.
    pub fn advance_reveal(&mut self) -> Result<RevealStage> {
        const ACTION: &str = "open cards";
        self.ensure_started(ACTION)?;
        let stage = self.session.stage;
        let next = stage.next().context(InvalidTransition {
            action: ACTION,
            reason: "all cards are already open",
        })?;
        ensure!(
            self.can_advance_reveal(),
            InvalidTransition {
                action: ACTION,
                reason: "all bets must be equal before the flop",
            }
        );
        self.session.cards_revealed.extend(next.dealt_on_entry());
        self.session.stage = next;
        debug!("opened {} at round {}", next, self.session.round);
        self.persist();
        Ok(next)
    }

    /// Pick the winner of the current round. Only possible at the river.
    pub fn select_winner(&mut self, id: PlayerId) -> Result<()> {
        const ACTION: &str = "select a winner";
        self.ensure_started(ACTION)?;
        ensure!(
            self.session.cards_revealed.len() == RevealStage::River.cards_revealed(),
            InvalidTransition {
                action: ACTION,
                reason: format!(
                    "only {} of {} cards are open",
                    self.session.cards_revealed.len(),
                    RevealStage::River.cards_revealed()
                ),
            }
        );
        self.player(id)?;
        self.session.winner_id = Some(id);
        self.persist();
        Ok(())
    }

    /// Settle the round: the winner takes every other wager, the rest lose
    /// theirs. The winner must be one of the players.
    pub fn finalize_round(&mut self) -> Result<RoundHistoryEntry> {
        let winner = self.session.winner_id.context(MissingWinner)?;
        self.player(winner)?;
        let session = &mut self.session;
        // Wagers held for anyone off the roster have no one to pay them.
        let bets = session.bets.for_players(&session.players);
        let pot = bets.total_except(winner);
        for p in session.players.iter_mut() {
            if p.id == winner {
                p.total_points += pot;
            } else {
                p.total_points -= bets.get(p.id);
            }
        }
        let entry = RoundHistoryEntry {
            round: session.round,
            bets,
            winner_id: winner,
            cards_revealed: session.cards_revealed.clone(),
        };
        session.round_history.push(entry.clone());
        session.round += 1;
        session.winner_id = None;
        session.bets = Wagers::zeroed(&session.players);
        session.cards_revealed.clear();
        session.stage = RevealStage::PreBet;
        info!(
            "round {} won by player {} for a pot of {}",
            entry.round, winner, pot
        );
        self.persist();
        Ok(entry)
    }

    /// Throw away the whole session, including its persisted copy.
    pub fn reset_session(&mut self) {
        self.session = Session::default();
        if let Err(e) = self.store.clear() {
            error!("while clearing saved game state: {}", e);
        }
        info!("session reset");
    }

    /// The last `n` settled rounds, newest first.
    pub fn recent_history(&self, n: usize) -> impl Iterator<Item = &RoundHistoryEntry> {
        self.session.round_history.iter().rev().take(n)
    }

    fn player(&self, id: PlayerId) -> Result<&Player> {
        self.session.player(id).context(Validation {
            reason: format!("no player with id {}", id),
        })
    }

    fn ensure_started(&self, action: &'static str) -> Result<()> {
        ensure!(
            self.session.setup_completed,
            InvalidTransition {
                action,
                reason: "players have not been set up",
            }
        );
        Ok(())
    }

    fn ensure_not_started(&self, action: &'static str) -> Result<()> {
        ensure!(
            !self.session.setup_completed,
            InvalidTransition {
                action,
                reason: "the game has already started",
            }
        );
        Ok(())
    }

    // Write the session out. Failures only cost durability, so they are
    // logged rather than returned.
    fn persist(&mut self) {
        match self.session.to_snapshot().to_json() {
            Ok(text) => {
                if let Err(e) = self.store.save(&text) {
                    error!("while saving game state: {}", e);
                }
            }
            Err(e) => error!("while encoding game state: {}", e),
        }
    }
}
