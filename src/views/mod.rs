//! Text views for each screen, plus the per-screen reaction to real-time events.

pub mod board;
pub mod history;
pub mod landing;
pub mod leaderboard;
pub mod lobby;

use crate::api::Tag;
use crate::model::{AdminGame, AdminPlayer, Game, Leaderboard, LoanPreview, PlayerHistory};
use crate::router::Screen;
use crate::state::{GameState, Session};
use crate::toast::ToastKind;
use crate::ws::GameEvent;

/// Everything a view may read for one render.
#[derive(Debug, Clone, Copy)]
pub struct ViewModel<'a> {
    pub state: &'a GameState,
    pub game: Option<&'a Game>,
    pub leaderboard: Option<&'a Leaderboard>,
    pub history: Option<&'a PlayerHistory>,
    pub loan_preview: Option<&'a LoanPreview>,
    pub saved_session: Option<&'a Session>,
    pub admin_games: Option<&'a [AdminGame]>,
    pub admin_players: Option<&'a [AdminPlayer]>,
}

impl<'a> ViewModel<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            game: None,
            leaderboard: None,
            history: None,
            loan_preview: None,
            saved_session: None,
            admin_games: None,
            admin_players: None,
        }
    }

    #[must_use]
    pub fn with_game(mut self, game: Option<&'a Game>) -> Self {
        self.game = game;
        self
    }

    #[must_use]
    pub fn with_leaderboard(mut self, leaderboard: Option<&'a Leaderboard>) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: Option<&'a PlayerHistory>) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_loan_preview(mut self, preview: Option<&'a LoanPreview>) -> Self {
        self.loan_preview = preview;
        self
    }

    #[must_use]
    pub fn with_saved_session(mut self, session: Option<&'a Session>) -> Self {
        self.saved_session = session;
        self
    }

    #[must_use]
    pub fn with_admin(mut self, games: Option<&'a [AdminGame]>, players: Option<&'a [AdminPlayer]>) -> Self {
        self.admin_games = games;
        self.admin_players = players;
        self
    }
}

/// What a view asks the app to do in response to a real-time event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Refetch(Tag),
    Navigate(Screen),
    Toast { message: String, kind: ToastKind },
}

/// Reaction of the screen currently shown to `event`.
pub fn on_event(screen: Screen, event: &GameEvent) -> Vec<Effect> {
    match screen {
        Screen::Lobby => lobby::on_event(event),
        Screen::Game => board::on_event(event),
        Screen::Landing | Screen::Leaderboard | Screen::History => Vec::new(),
    }
}

/// Pending notifications, newest last.
pub fn render_toasts(state: &GameState) -> String {
    let mut output = String::new();
    for toast in state.toasts.iter() {
        output.push_str(&format!("{toast}\n"));
    }
    output
}

fn rule(output: &mut String, title: &str) {
    output.push_str(&format!("=== {title} ===\n"));
}
