use std::str::FromStr;

use snafu::{OptionExt, ResultExt, Snafu};

use chiptally_game::{Command, PlayerId, Points};

pub const HELP: &str = "
Setup:
    players <n>            Start the setup form for <n> players.
    name <slot> <name>     Name the player in setup slot <slot>.
    start                  Finish setup and start the game.
    setup <name>...        Set up a game in one go, one player per name.

Play:
    bet <id> <delta>       Move a player's wager by <delta> points.
    raise <id>             Raise a player's wager by one step.
    lower <id>             Lower a player's wager by one step.
    open                   Open the next community cards.
    winner <id>            Select the round winner (all cards open).
    finalize               Settle the round and award points.

Other:
    show                   Print the table.
    history                Print recent rounds.
    reset                  Clear saved data and start over.
    help                   Show this screen.
    quit                   Leave (the game is saved).
";

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Play(Command),
    Show,
    History,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParseError {
    #[snafu(display("unknown command {:?}; try \"help\"", verb))]
    UnknownCommand { verb: String },

    #[snafu(display("usage: {}", usage))]
    Usage { usage: &'static str },

    #[snafu(display("{:?} is not a number", text))]
    NotANumber {
        text: String,
        source: std::num::ParseIntError,
    },
}

/// Parse one line. Blank lines yield `None`.
///
/// `step` is the amount `raise` and `lower` move a wager by.
pub fn parse(line: &str, step: Points) -> Result<Option<Input>, ParseError> {
    use Command::*;
    let mut words = line.split_whitespace();
    let verb = match words.next() {
        Some(v) => v.to_lowercase(),
        None => return Ok(None),
    };
    let rest: Vec<&str> = words.collect();
    let input = match verb.as_str() {
        "players" => Input::Play(BeginSetup {
            count: single(&rest, "players <n>")?.to_owned(),
        }),
        "name" => {
            const USAGE: &str = "name <slot> <name>";
            let slot: usize = number(rest.first().context(Usage { usage: USAGE })?)?;
            let index = slot.checked_sub(1).context(Usage { usage: USAGE })?;
            Input::Play(NamePlayer {
                index,
                name: rest[1..].join(" "),
            })
        }
        "start" => Input::Play(StartGame),
        "setup" => Input::Play(ConfigurePlayers {
            names: rest.iter().map(|s| s.to_string()).collect(),
        }),
        "bet" => match rest.as_slice() {
            [id, delta] => Input::Play(AdjustWager {
                player: PlayerId(number(id)?),
                delta: number(delta)?,
            }),
            _ => return Usage { usage: "bet <id> <delta>" }.fail(),
        },
        "raise" => Input::Play(AdjustWager {
            player: PlayerId(number(single(&rest, "raise <id>")?)?),
            delta: step,
        }),
        "lower" => Input::Play(AdjustWager {
            player: PlayerId(number(single(&rest, "lower <id>")?)?),
            delta: -step,
        }),
        "open" => Input::Play(AdvanceReveal),
        "winner" => Input::Play(SelectWinner {
            player: PlayerId(number(single(&rest, "winner <id>")?)?),
        }),
        "finalize" => Input::Play(FinalizeRound),
        "reset" => Input::Play(ResetSession),
        "show" => Input::Show,
        "history" => Input::History,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => return UnknownCommand { verb: verb.clone() }.fail(),
    };
    Ok(Some(input))
}

fn single<'a>(rest: &[&'a str], usage: &'static str) -> Result<&'a str, ParseError> {
    match rest {
        [one] => Ok(*one),
        _ => Usage { usage }.fail(),
    }
}

fn number<T>(text: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    let text = text.strip_prefix('+').unwrap_or(text);
    text.parse().context(NotANumber { text })
}
