use log::warn;
use yew::{html, Component, ComponentLink, Html, InputData, ShouldRender};

use chiptally_game::{
    Command, Player, PlayerId, Points, RevealStage, RoundHistoryEntry, RoundTracker, Settings,
};

use crate::store::LocalStore;

pub struct App {
    link: ComponentLink<Self>,
    tracker: RoundTracker<LocalStore>,
    count_input: String,
    notice: Option<String>,
}

pub enum Msg {
    CountInput(String),
    BeginSetup,
    NameInput(usize, String),
    StartGame,
    AdjustWager(PlayerId, Points),
    OpenCards,
    SelectWinner(PlayerId),
    Finalize,
    Reset,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_: Self::Properties, link: ComponentLink<Self>) -> Self {
        let tracker = RoundTracker::open(Settings::default(), LocalStore::new());
        let count_input = tracker
            .session()
            .num_players
            .map(|n| n.to_string())
            .unwrap_or_default();
        App {
            link,
            tracker,
            count_input,
            notice: None,
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        let cmd = match msg {
            Msg::CountInput(value) => {
                self.count_input = value;
                return true;
            }
            Msg::BeginSetup => Command::BeginSetup {
                count: self.count_input.clone(),
            },
            Msg::NameInput(index, name) => Command::NamePlayer { index, name },
            Msg::StartGame => Command::StartGame,
            Msg::AdjustWager(player, delta) => Command::AdjustWager { player, delta },
            Msg::OpenCards => Command::AdvanceReveal,
            Msg::SelectWinner(player) => Command::SelectWinner { player },
            Msg::Finalize => Command::FinalizeRound,
            Msg::Reset => {
                if !confirm("Are you sure you want to clear saved data and reset the game?") {
                    return false;
                }
                self.count_input.clear();
                Command::ResetSession
            }
        };
        self.notice = match self.tracker.execute(cmd) {
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
        true
    }

    fn change(&mut self, _: Self::Properties) -> ShouldRender {
        false
    }

    fn view(&self) -> Html {
        let session = self.tracker.session();
        let body = if session.setup_completed {
            self.view_table()
        } else if session.player_names.is_empty() {
            self.view_count_form()
        } else {
            self.view_names_form()
        };
        html! {
            <div class="tracker">
                { body }
                { self.view_notice() }
            </div>
        }
    }
}

impl App {
    fn view_notice(&self) -> Html {
        match &self.notice {
            Some(text) => html! { <p class="notice">{ text }</p> },
            None => html! {},
        }
    }

    fn view_reset(&self) -> Html {
        html! {
            <button class="reset" onclick=self.link.callback(|_| Msg::Reset)>
                { "Clear Saved Data & Reset" }
            </button>
        }
    }

    fn view_count_form(&self) -> Html {
        html! {
            <div class="setup">
                <h1>{ "Poker Point Tracker Setup" }</h1>
                <label>
                    { "Enter number of players (2 or more):" }
                    <input
                        type="number"
                        min="2"
                        value=&self.count_input
                        oninput=self.link.callback(|e: InputData| Msg::CountInput(e.value))
                    />
                </label>
                <button onclick=self.link.callback(|_| Msg::BeginSetup)>{ "Next" }</button>
                { self.view_reset() }
            </div>
        }
    }

    fn view_names_form(&self) -> Html {
        let names = &self.tracker.session().player_names;
        html! {
            <div class="setup">
                <h1>{ "Poker Point Tracker Setup" }</h1>
                <p>{ "Enter player names:" }</p>
                { for names.iter().enumerate().map(|(i, name)| self.view_name_input(i, name)) }
                <button onclick=self.link.callback(|_| Msg::StartGame)>{ "Start Game" }</button>
                { self.view_reset() }
            </div>
        }
    }

    fn view_name_input(&self, index: usize, name: &str) -> Html {
        let placeholder = format!("Player {} name", index + 1);
        html! {
            <input
                type="text"
                placeholder=placeholder
                value=name
                oninput=self.link.callback(move |e: InputData| Msg::NameInput(index, e.value))
            />
        }
    }

    fn view_table(&self) -> Html {
        let session = self.tracker.session();
        let cards = if session.cards_revealed.len() == RevealStage::River.cards_revealed() {
            "All cards opened!".to_owned()
        } else {
            format!("Cards Opened: {}", join(&session.cards_revealed, ", "))
        };
        let open_disabled = !self.tracker.can_advance_reveal();
        let finalize = if session.stage == RevealStage::River {
            html! {
                <button class="next-round" onclick=self.link.callback(|_| Msg::Finalize)>
                    { "Finalize Round & Award Points" }
                </button>
            }
        } else {
            html! {}
        };
        html! {
            <div class="table">
                <h1>{ "Poker Point Tracking System" }</h1>
                { self.view_reset() }
                <div class="info-row">
                    <div>{ format!("Round: {}", session.round) }</div>
                    <div>{ cards }</div>
                </div>
                <table>
                    <thead>
                        <tr>
                            <th>{ "Player" }</th>
                            <th>{ "Total Points" }</th>
                            <th>{ "Current Bet" }</th>
                            <th>{ "Adjust Bet" }</th>
                            <th>{ "Select Winner" }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for session.players.iter().map(|p| self.view_player(p)) }
                    </tbody>
                </table>
                <button
                    class="next-round"
                    disabled=open_disabled
                    onclick=self.link.callback(|_| Msg::OpenCards)
                >
                    { "Open Cards" }
                </button>
                { finalize }
                { self.view_history() }
            </div>
        }
    }

    fn view_player(&self, p: &Player) -> Html {
        let session = self.tracker.session();
        let id = p.id;
        let step = self.tracker.settings().wager_step;
        let is_winner = session.winner_id == Some(id);
        let row_class = if is_winner { "winner" } else { "" };
        let raise_disabled = !self.tracker.can_raise(id, step);
        let lower_disabled = !self.tracker.can_lower(id);
        let pick_disabled = session.stage != RevealStage::River;
        html! {
            <tr class=row_class>
                <td>{ &p.name }</td>
                <td>{ p.total_points }</td>
                <td>{ session.bets.get(id) }</td>
                <td>
                    <button
                        disabled=raise_disabled
                        onclick=self.link.callback(move |_| Msg::AdjustWager(id, step))
                    >
                        { format!("+{}", step) }
                    </button>
                    <button
                        disabled=lower_disabled
                        onclick=self.link.callback(move |_| Msg::AdjustWager(id, -step))
                    >
                        { format!("-{}", step) }
                    </button>
                </td>
                <td>
                    <input
                        type="radio"
                        name="winner"
                        checked=is_winner
                        disabled=pick_disabled
                        onclick=self.link.callback(move |_| Msg::SelectWinner(id))
                    />
                </td>
            </tr>
        }
    }

    fn view_history(&self) -> Html {
        let window = self.tracker.settings().history_window;
        let entries: Vec<&RoundHistoryEntry> = self.tracker.recent_history(window).collect();
        let body = if entries.is_empty() {
            html! { <p>{ "No rounds played yet." }</p> }
        } else {
            html! { <>{ for entries.into_iter().map(|e| self.view_history_entry(e)) }</> }
        };
        html! {
            <div class="history">
                <h3>{ format!("Round History (Last {} rounds)", window) }</h3>
                { body }
            </div>
        }
    }

    fn view_history_entry(&self, e: &RoundHistoryEntry) -> Html {
        let session = self.tracker.session();
        let winner = session
            .player(e.winner_id)
            .map_or("N/A", |p| p.name.as_str());
        html! {
            <div class="round-entry">
                <strong>{ format!("Round {}", e.round) }</strong>
                { format!(", Winner: {}, Cards Opened: {}", winner, join(&e.cards_revealed, ",")) }
                <br />
                { "Bets: " }
                { for session.players.iter().map(|p| html! {
                    <span>{ format!("{}: {} ", p.name, e.bets.get(p.id)) }</span>
                }) }
            </div>
        }
    }
}

fn confirm(message: &str) -> bool {
    match web_sys::window().map(|w| w.confirm_with_message(message)) {
        Some(Ok(answer)) => answer,
        Some(Err(e)) => {
            warn!("confirm dialog failed: {:?}", e);
            false
        }
        None => false,
    }
}

fn join<T: ToString>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
