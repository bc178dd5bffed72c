use crate::model::{PlayerId, Points, RevealStage, RoundHistoryEntry};
use crate::snapshot::SnapshotStore;
use crate::tracker::{Result, RoundTracker};

/// Every operation a front-end may ask of the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set up the game in one step, one player per name.
    ConfigurePlayers { names: Vec<String> },
    /// First step of the setup form: how many players.
    BeginSetup { count: String },
    /// Fill in a name slot of the setup form, counted from 0.
    NamePlayer { index: usize, name: String },
    /// Last step of the setup form.
    StartGame,
    AdjustWager { player: PlayerId, delta: Points },
    AdvanceReveal,
    SelectWinner { player: PlayerId },
    FinalizeRound,
    ResetSession,
}

/// What a successfully executed command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Configured { players: usize },
    SetupBegun { slots: usize },
    NameSet { index: usize },
    /// `applied` is false when the wager would have exceeded the player's
    /// points and was left alone.
    Wager {
        player: PlayerId,
        amount: Points,
        applied: bool,
    },
    Revealed(RevealStage),
    WinnerSelected(PlayerId),
    Finalized(RoundHistoryEntry),
    Reset,
}

impl<S: SnapshotStore> RoundTracker<S> {
    /// Apply a single command.
    pub fn execute(&mut self, cmd: Command) -> Result<Outcome> {
        use Command::*;
        Ok(match cmd {
            ConfigurePlayers { names } => {
                let session = self.configure_players(names.len(), &names)?;
                Outcome::Configured {
                    players: session.players.len(),
                }
            }
            BeginSetup { count } => Outcome::SetupBegun {
                slots: self.begin_setup(&count)?.len(),
            },
            NamePlayer { index, name } => {
                self.set_player_name(index, &name)?;
                Outcome::NameSet { index }
            }
            StartGame => Outcome::Configured {
                players: self.start_game()?.players.len(),
            },
            AdjustWager { player, delta } => {
                let (bets, applied) = self.adjust_wager(player, delta)?;
                Outcome::Wager {
                    player,
                    amount: bets.get(player),
                    applied,
                }
            }
            AdvanceReveal => Outcome::Revealed(self.advance_reveal()?),
            SelectWinner { player } => {
                self.select_winner(player)?;
                Outcome::WinnerSelected(player)
            }
            FinalizeRound => Outcome::Finalized(self.finalize_round()?),
            ResetSession => {
                self.reset_session();
                Outcome::Reset
            }
        })
    }
}
