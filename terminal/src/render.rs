use std::io::{self, Write};

use chiptally_game::{
    Outcome, PlayerId, RevealStage, RoundHistoryEntry, RoundTracker, Session, SnapshotStore,
};

/// Print the setup form or the table, whichever the session is at.
pub fn table<S, W>(tracker: &RoundTracker<S>, out: &mut W) -> io::Result<()>
where
    S: SnapshotStore,
    W: Write,
{
    let s = tracker.session();
    if !s.setup_completed {
        return setup_form(s, out);
    }
    let cards = if s.stage == RevealStage::River {
        "All cards opened!".to_owned()
    } else {
        format!("Cards opened: {}", join(&s.cards_revealed, ", "))
    };
    writeln!(out, "Round {} ({})  {}", s.round, s.stage, cards)?;
    writeln!(out, "{:>4}  {:<16}{:>8}{:>8}", "id", "player", "points", "bet")?;
    for p in &s.players {
        let marker = if s.winner_id == Some(p.id) { "  <- winner" } else { "" };
        writeln!(
            out,
            "{:>4}  {:<16}{:>8}{:>8}{}",
            p.id.0,
            p.name,
            p.total_points,
            s.bets.get(p.id),
            marker
        )?;
    }
    if !tracker.can_advance_reveal() && s.stage == RevealStage::PreBet {
        writeln!(out, "All bets must be equal to open the cards.")?;
    }
    Ok(())
}

fn setup_form<W: Write>(s: &Session, out: &mut W) -> io::Result<()> {
    match s.num_players {
        None => writeln!(
            out,
            "No game set up. Enter `players <n>` (2 or more) or `setup <name>...`."
        ),
        Some(n) => {
            writeln!(out, "Setting up {} players:", n)?;
            for (i, name) in s.player_names.iter().enumerate() {
                let shown = if name.trim().is_empty() {
                    format!("(Player {})", i + 1)
                } else {
                    name.clone()
                };
                writeln!(out, "{:>4}  {}", i + 1, shown)?;
            }
            writeln!(out, "Use `name <slot> <name>`, then `start`.")
        }
    }
}

/// Print the most recent rounds, newest first.
pub fn history<S, W>(tracker: &RoundTracker<S>, out: &mut W) -> io::Result<()>
where
    S: SnapshotStore,
    W: Write,
{
    let window = tracker.settings().history_window;
    writeln!(out, "Round history (last {} rounds)", window)?;
    let mut any = false;
    for entry in tracker.recent_history(window) {
        any = true;
        history_entry(tracker.session(), entry, out)?;
    }
    if !any {
        writeln!(out, "No rounds played yet.")?;
    }
    Ok(())
}

fn history_entry<W: Write>(s: &Session, e: &RoundHistoryEntry, out: &mut W) -> io::Result<()> {
    let winner = s
        .player(e.winner_id)
        .map_or("N/A", |p| p.name.as_str());
    let bets: Vec<String> = s
        .players
        .iter()
        .map(|p| format!("{}: {}", p.name, e.bets.get(p.id)))
        .collect();
    writeln!(
        out,
        "Round {}, Winner: {}, Cards opened: {}\n    Bets: {}",
        e.round,
        winner,
        join(&e.cards_revealed, ","),
        bets.join(" ")
    )
}

/// Describe what a command just did.
pub fn outcome<W: Write>(s: &Session, o: &Outcome, out: &mut W) -> io::Result<()> {
    let name = |id: PlayerId| {
        s.player(id)
            .map_or_else(|| format!("player {}", id), |p| p.name.clone())
    };
    match o {
        Outcome::Configured { players } => {
            writeln!(out, "Started a game with {} players.", players)
        }
        Outcome::SetupBegun { slots } => writeln!(out, "Enter {} player names.", slots),
        Outcome::NameSet { index } => writeln!(out, "Named slot {}.", index + 1),
        Outcome::Wager {
            player,
            amount,
            applied: true,
        } => writeln!(out, "{} now bets {}.", name(*player), amount),
        Outcome::Wager {
            player,
            amount,
            applied: false,
        } => writeln!(
            out,
            "{} cannot bet more than they hold; bet stays at {}.",
            name(*player),
            amount
        ),
        Outcome::Revealed(stage) => writeln!(out, "Opened the {}.", stage),
        Outcome::WinnerSelected(id) => writeln!(out, "{} selected as winner.", name(*id)),
        Outcome::Finalized(entry) => writeln!(
            out,
            "Round {} settled: {} wins {} points.",
            entry.round,
            name(entry.winner_id),
            entry.pot()
        ),
        Outcome::Reset => writeln!(out, "Cleared saved data."),
    }
}

fn join<T: ToString>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
