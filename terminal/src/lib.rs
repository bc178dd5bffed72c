#![warn(rust_2018_idioms)]

use std::io::{BufRead, Write};

use log::{debug, info, warn};

use chiptally_game::{Command, Outcome, RoundTracker};

pub mod input;
pub mod render;
pub mod settings;
pub mod store;

use input::Input;
use store::FileStore;

/// Execute one whole terminal session: restore the saved game, then read
/// commands from `reader` until it ends or the user quits.
pub fn run<R, W>(settings: settings::Settings, reader: R, mut output: W) -> anyhow::Result<Stats>
where
    R: BufRead,
    W: Write,
{
    let store = FileStore::new(&settings.storage.path);
    info!("using saved state at {}", store.path().display());
    let mut tracker = RoundTracker::open(settings.game, store);
    let step = tracker.settings().wager_step;
    let mut stats = Stats::default();

    render::table(&tracker, &mut output)?;
    let mut lines = reader.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let parsed = match input::parse(&line, step) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };
        match parsed {
            Input::Quit => break,
            Input::Help => writeln!(output, "{}", input::HELP)?,
            Input::Show => render::table(&tracker, &mut output)?,
            Input::History => render::history(&tracker, &mut output)?,
            Input::Play(Command::ResetSession) => {
                write!(output, "Clear saved data and reset the game? [y/N] ")?;
                output.flush()?;
                let answer = lines.next().transpose()?.unwrap_or_default();
                if answer.trim().eq_ignore_ascii_case("y") {
                    execute(&mut tracker, Command::ResetSession, &mut stats, &mut output)?;
                } else {
                    writeln!(output, "Reset cancelled.")?;
                }
            }
            Input::Play(cmd) => execute(&mut tracker, cmd, &mut stats, &mut output)?,
        }
    }
    writeln!(output)?;
    info!(
        "leaving after {} commands and {} rounds",
        stats.commands_executed, stats.rounds_finalized
    );
    Ok(stats)
}

fn execute<S, W>(
    tracker: &mut RoundTracker<S>,
    cmd: Command,
    stats: &mut Stats,
    output: &mut W,
) -> anyhow::Result<()>
where
    S: chiptally_game::SnapshotStore,
    W: Write,
{
    debug!("executing {:?}", cmd);
    match tracker.execute(cmd) {
        Ok(outcome) => {
            stats.commands_executed += 1;
            if let Outcome::Finalized(_) = outcome {
                stats.rounds_finalized += 1;
            }
            render::outcome(tracker.session(), &outcome, output)?;
            render::table(tracker, output)?;
        }
        Err(e) => {
            warn!("rejected command: {}", e);
            writeln!(output, "{}", e)?;
        }
    }
    Ok(())
}

/// Counters for a finished terminal session.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    pub commands_executed: usize,
    pub rounds_finalized: usize,
}
