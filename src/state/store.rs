//! Client state, its reducer, and the store that persists after each change.

use std::time::Duration;

use tracing::{debug, trace};

use crate::model::{PlayerId, RoundResult};
use crate::router::Screen;
use crate::state::session::{Session, SessionStore};
use crate::toast::{ToastId, ToastKind, ToastQueue};

#[derive(Debug, Clone)]
pub struct GameState {
    pub current_screen: Screen,
    pub game_code: Option<String>,
    pub current_player_id: Option<PlayerId>,
    pub current_player_name: Option<String>,
    pub is_rolling: bool,
    pub dice_value: Option<u8>,
    pub last_round_result: Option<RoundResult>,
    pub show_housing_modal: bool,
    pub show_loan_modal: bool,
    pub selected_round: u32,
    pub toasts: ToastQueue,
}

impl GameState {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            current_screen: Screen::Landing,
            game_code: None,
            current_player_id: None,
            current_player_name: None,
            is_rolling: false,
            dice_value: None,
            last_round_result: None,
            show_housing_modal: false,
            show_loan_modal: false,
            selected_round: 1,
            toasts: ToastQueue::with_default_duration(toast_duration),
        }
    }

    /// The persisted subset.
    pub fn session(&self) -> Session {
        Session {
            game_code: self.game_code.clone(),
            current_player_id: self.current_player_id.clone(),
            current_player_name: self.current_player_name.clone(),
            current_screen: self.current_screen,
        }
    }

    pub fn has_joined(&self) -> bool {
        self.current_player_id.is_some()
    }

    /// Apply one action. Returns the id of a toast the action created.
    pub fn reduce(&mut self, action: Action) -> Option<ToastId> {
        match action {
            Action::NavigateTo(screen) => self.current_screen = screen,
            Action::SetGameCode(code) => self.game_code = code,
            Action::SetCurrentPlayer { id, name } => {
                self.current_player_id = Some(id);
                self.current_player_name = Some(name);
            }
            Action::ClearGameState => {
                self.game_code = None;
                self.current_player_id = None;
                self.current_player_name = None;
                self.current_screen = Screen::Landing;
                self.last_round_result = None;
                self.dice_value = None;
            }
            Action::RestoreGameState(session) => {
                self.game_code = session.game_code;
                self.current_player_id = session.current_player_id;
                self.current_player_name = session.current_player_name;
                self.current_screen = session.current_screen;
            }
            Action::StartDiceRoll => {
                self.is_rolling = true;
                self.dice_value = None;
            }
            Action::FinishDiceRoll(value) => {
                self.is_rolling = false;
                self.dice_value = value;
            }
            Action::SetLastRoundResult(result) => self.last_round_result = Some(*result),
            Action::ToggleHousingModal => self.show_housing_modal = !self.show_housing_modal,
            Action::ToggleLoanModal => self.show_loan_modal = !self.show_loan_modal,
            Action::SetSelectedRound(round) => self.selected_round = round.max(1),
            Action::AddToast { message, kind, duration } => {
                return Some(self.toasts.push(message, kind, duration));
            }
            Action::RemoveToast(id) => {
                self.toasts.remove(id);
            }
        }
        None
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    NavigateTo(Screen),
    SetGameCode(Option<String>),
    SetCurrentPlayer { id: PlayerId, name: String },
    ClearGameState,
    RestoreGameState(Session),
    StartDiceRoll,
    FinishDiceRoll(Option<u8>),
    SetLastRoundResult(Box<RoundResult>),
    ToggleHousingModal,
    ToggleLoanModal,
    SetSelectedRound(u32),
    AddToast { message: String, kind: ToastKind, duration: Option<Duration> },
    RemoveToast(ToastId),
}

impl Action {
    pub fn toast(message: impl Into<String>, kind: ToastKind) -> Self {
        Action::AddToast { message: message.into(), kind, duration: None }
    }
}

/// Owns the state and the persistence adapter. Every dispatch writes the
/// persisted subset back; last write wins.
pub struct Store {
    state: GameState,
    persistence: Box<dyn SessionStore>,
}

impl Store {
    /// Build the store, restoring whatever session the adapter holds.
    pub fn new(persistence: Box<dyn SessionStore>, toast_duration: Duration) -> Self {
        let mut state = GameState::new(toast_duration);
        if let Some(saved) = persistence.load() {
            debug!(game_code = ?saved.game_code, screen = %saved.current_screen, "restored session");
            state.reduce(Action::RestoreGameState(saved));
        }
        Self { state, persistence }
    }

    pub fn dispatch(&mut self, action: Action) -> Option<ToastId> {
        trace!(?action, "dispatch");
        let clears = matches!(action, Action::ClearGameState);
        let toast = self.state.reduce(action);
        if clears {
            self.persistence.clear();
        } else {
            self.persistence.save(&self.state.session());
        }
        toast
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Whatever the adapter currently holds, independent of in-memory state.
    pub fn saved_session(&self) -> Option<Session> {
        self.persistence.load()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("state", &self.state).finish_non_exhaustive()
    }
}
