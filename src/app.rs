//! Session controller: the one place that talks to the backend, the store
//! and the real-time channel on behalf of the player.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashSet;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::api::{decode, ApiClient, Endpoint, QueryCache, Tag};
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::model::{
    AdminGame, AdminPlayer, CreatedGame, Game, HousingType, JoinedPlayer, Leaderboard, LoanPreview,
    PlayerHistory, PlayerId, PlayerStatus, RoundResult,
};
use crate::router::{self, Screen};
use crate::state::{Action, FileSessionStore, GameState, Session, SessionStore, Store};
use crate::toast::{ToastId, ToastKind};
use crate::views::{self, lobby, Effect, ViewModel};
use crate::ws::{ChannelState, Connector, GameChannel, GameEvent, WsConnector};

const ROUND_TOAST_DURATION: Duration = Duration::from_millis(6000);

type Update = (GameEvent, Vec<Effect>);

/// Removes its key from the in-flight set when dropped.
struct InFlight<'a> {
    set: &'a DashSet<String>,
    key: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.key);
    }
}

pub struct App<C: Connector = WsConnector> {
    config: Config,
    store: Arc<Mutex<Store>>,
    api: ApiClient,
    cache: Arc<QueryCache>,
    channel: GameChannel<C>,
    in_flight: DashSet<String>,
    epoch: AtomicU64,
    admin: AtomicBool,
    following: AtomicBool,
    loan_preview: Mutex<Option<LoanPreview>>,
    updates_tx: mpsc::UnboundedSender<Update>,
    updates_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<Update>>,
}

impl App<WsConnector> {
    /// Production wiring: file-backed session and a websocket channel.
    pub fn new(config: Config) -> Result<Self> {
        let persistence = FileSessionStore::new(config.session_file.clone());
        Self::with_parts(config, Box::new(persistence), WsConnector)
    }
}

impl<C: Connector> App<C> {
    pub fn with_parts(config: Config, persistence: Box<dyn SessionStore>, connector: C) -> Result<Self> {
        let api = ApiClient::new(&config.api_url)?;
        let store = Store::new(persistence, config.toast_duration);
        let channel = GameChannel::new(connector, config.ws_url.clone());
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Ok(Self {
            config,
            store: Arc::new(Mutex::new(store)),
            api,
            cache: Arc::new(QueryCache::new()),
            channel,
            in_flight: DashSet::new(),
            epoch: AtomicU64::new(0),
            admin: AtomicBool::new(false),
            following: AtomicBool::new(false),
            loan_preview: Mutex::new(None),
            updates_tx,
            updates_rx: tokio::sync::Mutex::new(updates_rx),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.store.lock().snapshot()
    }

    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    pub fn watch_channel(&self) -> watch::Receiver<ChannelState> {
        self.channel.watch_state()
    }

    // ---- state plumbing ----

    fn dispatch(&self, action: Action) -> Option<ToastId> {
        let scheduled = {
            let mut store = self.store.lock();
            let moves_session = match &action {
                Action::SetGameCode(code) => *code != store.state().game_code,
                Action::ClearGameState | Action::RestoreGameState(_) => true,
                _ => false,
            };
            if moves_session {
                self.epoch.fetch_add(1, Ordering::SeqCst);
            }
            store
                .dispatch(action)
                .and_then(|id| store.state().toasts.get(id).map(|t| (id, t.duration)))
        };
        let (id, duration) = scheduled?;
        self.schedule_expiry(id, duration);
        Some(id)
    }

    fn schedule_expiry(&self, id: ToastId, duration: Duration) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let store = Arc::downgrade(&self.store);
        runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(store) = store.upgrade() {
                store.lock().dispatch(Action::RemoveToast(id));
            }
        });
    }

    fn toast(&self, message: impl Into<String>, kind: ToastKind) -> Option<ToastId> {
        self.dispatch(Action::toast(message, kind))
    }

    /// Surface `err` as an error toast, unless it only reports a superseded session.
    fn fail<T>(&self, err: ClientError, fallback: &str) -> Result<T> {
        if !matches!(err, ClientError::Stale | ClientError::Busy) {
            warn!(error = %err, "{fallback}");
            self.toast(err.user_message(fallback), ToastKind::Error);
        }
        Err(err)
    }

    fn reject<T>(&self, message: &str) -> Result<T> {
        self.toast(message, ToastKind::Warning);
        Err(ClientError::InvalidInput(message.to_string()))
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn ensure_current(&self, started: u64) -> Result<()> {
        if self.current_epoch() == started {
            Ok(())
        } else {
            debug!(started, now = self.current_epoch(), "dropping response for a previous session");
            Err(ClientError::Stale)
        }
    }

    fn begin(&self, key: String) -> Result<InFlight<'_>> {
        if !self.in_flight.insert(key.clone()) {
            debug!(%key, "already in flight");
            return Err(ClientError::Busy);
        }
        Ok(InFlight { set: &self.in_flight, key })
    }

    fn game_code(&self) -> Result<String> {
        self.store.lock().state().game_code.clone().ok_or(ClientError::NoGame)
    }

    fn player(&self) -> Result<(PlayerId, String)> {
        let store = self.store.lock();
        let state = store.state();
        match (&state.current_player_id, &state.current_player_name) {
            (Some(id), Some(name)) => Ok((id.clone(), name.clone())),
            _ => Err(ClientError::NotJoined),
        }
    }

    async fn call<T: DeserializeOwned>(&self, endpoint: &Endpoint, started: u64) -> Result<T> {
        let value = if endpoint.is_query() {
            self.cache.query(&self.api, endpoint).await?
        } else {
            self.cache.mutate(&self.api, endpoint).await?
        };
        self.ensure_current(started)?;
        decode(value)
    }

    async fn execute(&self, endpoint: &Endpoint, started: u64) -> Result<()> {
        self.cache.mutate(&self.api, endpoint).await?;
        self.ensure_current(started)
    }

    fn cached_game(&self) -> Option<Game> {
        let code = self.game_code().ok()?;
        let value = self.cache.cached(&Endpoint::GetGame { game_code: code })?;
        decode(value).ok()
    }

    /// Re-point the channel after the game code changed, if following.
    async fn refollow(&self) {
        if self.following.load(Ordering::SeqCst) {
            let code = self.game_code().ok();
            self.channel.set_game_code(code.as_deref()).await;
        }
    }

    // ---- session ----

    pub async fn create_game(&self) -> Result<String> {
        let _guard = self.begin("createGame".into())?;
        let started = self.current_epoch();
        let created: CreatedGame = match self.call(&Endpoint::CreateGame, started).await {
            Ok(created) => created,
            Err(err) => return self.fail(err, "Failed to create game"),
        };

        info!(game_code = %created.game_code, "game created");
        self.dispatch(Action::ClearGameState);
        self.dispatch(Action::SetGameCode(Some(created.game_code.clone())));
        self.toast("Game created! Invite your friends 🎲", ToastKind::Success);
        self.dispatch(Action::NavigateTo(Screen::Lobby));
        self.refollow().await;
        Ok(created.game_code)
    }

    pub async fn join_game(&self, game_code: &str, player_name: &str) -> Result<JoinedPlayer> {
        let game_code = game_code.trim();
        let player_name = player_name.trim();
        if game_code.is_empty() {
            return self.reject("Please enter code and name");
        }
        if player_name.is_empty() {
            return self.reject("Enter your name to join!");
        }

        let _guard = self.begin(format!("joinGame:{game_code}"))?;
        let started = self.current_epoch();
        let endpoint = Endpoint::JoinGame {
            game_code: game_code.to_string(),
            player_name: player_name.to_string(),
        };
        let joined: JoinedPlayer = match self.call(&endpoint, started).await {
            Ok(joined) => joined,
            Err(err) => return self.fail(err, "Failed to join game"),
        };

        info!(game_code, player_id = %joined.id, "joined game");
        if self.game_code().ok().as_deref() != Some(game_code) {
            self.dispatch(Action::ClearGameState);
            self.dispatch(Action::SetGameCode(Some(game_code.to_string())));
        }
        self.dispatch(Action::SetCurrentPlayer { id: joined.id.clone(), name: joined.name.clone() });
        self.toast(format!("Welcome, {}! 🎉", joined.name), ToastKind::Success);
        self.dispatch(Action::NavigateTo(Screen::Lobby));
        self.refollow().await;
        Ok(joined)
    }

    /// The persisted session, when it names a player in a game.
    pub fn saved_session(&self) -> Option<Session> {
        self.store.lock().saved_session().filter(Session::is_resumable)
    }

    pub async fn resume(&self) -> Result<Screen> {
        let Some(saved) = self.saved_session() else {
            return self.fail(ClientError::NoGame, "No saved game to resume");
        };
        let screen = match saved.current_screen {
            Screen::Landing => Screen::Lobby,
            other => other,
        };
        let name = saved.current_player_name.clone().unwrap_or_default();
        self.dispatch(Action::RestoreGameState(saved));
        self.dispatch(Action::NavigateTo(screen));
        self.toast(format!("Welcome back, {name}! 🎲"), ToastKind::Success);
        self.refollow().await;
        Ok(screen)
    }

    /// Drop the current game and go back to the landing screen.
    pub async fn leave(&self) {
        self.dispatch(Action::ClearGameState);
        self.cache.clear();
        self.refollow().await;
    }

    /// Like [`App::leave`], and says so.
    pub async fn forget(&self) {
        self.leave().await;
        self.toast("Local storage cleared", ToastKind::Info);
    }

    // ---- lobby ----

    pub async fn start_game(&self) -> Result<()> {
        let code = match self.game_code() {
            Ok(code) => code,
            Err(err) => return self.fail(err, "Failed to start game"),
        };
        if !self.is_admin() {
            if let Err(err) = self.player() {
                return self.fail(err, "Join the game before starting it");
            }
            let game = match self.game().await {
                Ok(game) => game,
                Err(err) => return self.fail(err, "Failed to start game"),
            };
            if game.players.len() < lobby::MIN_PLAYERS_TO_START {
                return self.reject("Need at least 2 players to start");
            }
        }

        let _guard = self.begin(format!("startGame:{code}"))?;
        let started = self.current_epoch();
        if let Err(err) = self.execute(&Endpoint::StartGame { game_code: code.clone() }, started).await {
            return self.fail(err, "Failed to start game");
        }
        info!(game_code = %code, "game started");
        self.toast("Game started! Let's go! 🎲", ToastKind::Success);
        self.dispatch(Action::NavigateTo(Screen::Game));
        Ok(())
    }

    /// Current game snapshot. Moves a waiting lobby onto the board once the
    /// game is running.
    pub async fn game(&self) -> Result<Game> {
        let game_code = self.game_code()?;
        let started = self.current_epoch();
        let game: Game = self.call(&Endpoint::GetGame { game_code }, started).await?;
        let on_lobby = self.store.lock().state().current_screen == Screen::Lobby;
        if on_lobby {
            if let Some(screen) = lobby::redirect(&game) {
                debug!(game_code = %game.game_code, "game already running; leaving lobby");
                self.dispatch(Action::NavigateTo(screen));
            }
        }
        Ok(game)
    }

    // ---- board ----

    pub async fn pick_housing(&self, housing: HousingType) -> Result<()> {
        let (player_id, _) = match self.player() {
            Ok(player) => player,
            Err(err) => return self.fail(err, "Failed to pick housing"),
        };
        let _guard = self.begin(format!("pickHousing:{player_id}"))?;
        let started = self.current_epoch();
        if let Err(err) = self.execute(&Endpoint::PickHousing { player_id, housing }, started).await {
            return self.fail(err, "Failed to pick housing");
        }
        self.toast("Housing updated successfully! 🏠", ToastKind::Success);
        if self.store.lock().state().show_housing_modal {
            self.dispatch(Action::ToggleHousingModal);
        }
        Ok(())
    }

    /// Roll the dice. Only one roll per player may be outstanding; a second
    /// call while the first is in flight returns [`ClientError::Busy`]
    /// without touching the backend.
    pub async fn play_round(&self, loan_payment_naira: i64) -> Result<RoundResult> {
        let (player_id, _) = match self.player() {
            Ok(player) => player,
            Err(err) => return self.fail(err, "Failed to play round"),
        };
        if loan_payment_naira < 0 {
            return self.reject("Loan payment cannot be negative");
        }
        let game = match self.game().await {
            Ok(game) => game,
            Err(err) => return self.fail(err, "Failed to play round"),
        };
        if game.player(&player_id).is_some_and(|p| p.status == PlayerStatus::Eliminated) {
            return self.reject("You have been eliminated");
        }

        let _guard = self.begin(format!("playRound:{player_id}"))?;
        self.dispatch(Action::StartDiceRoll);
        let started = self.current_epoch();
        let endpoint = Endpoint::PlayRound { player_id, loan_payment_naira };
        let result: RoundResult = match self.call(&endpoint, started).await {
            Ok(result) => result,
            Err(err) => {
                self.dispatch(Action::FinishDiceRoll(None));
                return self.fail(err, "Failed to play round");
            }
        };

        info!(round = result.round_number, dice = result.dice_roll, event = %result.event_type, "round played");
        self.dispatch(Action::FinishDiceRoll(Some(result.dice_roll)));
        self.dispatch(Action::SetLastRoundResult(Box::new(result.clone())));
        let kind = if result.event_type.is_favourable() { ToastKind::Success } else { ToastKind::Warning };
        self.dispatch(Action::AddToast {
            message: format!(
                "Round {} complete! {} {}",
                result.round_number,
                result.event_type.icon(),
                result.event_description
            ),
            kind,
            duration: Some(ROUND_TOAST_DURATION),
        });
        Ok(result)
    }

    /// What paying `proposed_payment_naira` would do to the loan. Changes nothing server-side.
    pub async fn preview_loan(&self, proposed_payment_naira: i64) -> Result<LoanPreview> {
        let (player_id, _) = match self.player() {
            Ok(player) => player,
            Err(err) => return self.fail(err, "Failed to preview loan"),
        };
        let started = self.current_epoch();
        let endpoint = Endpoint::PreviewLoan { player_id, proposed_payment_naira };
        match self.call::<LoanPreview>(&endpoint, started).await {
            Ok(preview) => {
                *self.loan_preview.lock() = Some(preview.clone());
                Ok(preview)
            }
            Err(err) => self.fail(err, "Failed to preview loan"),
        }
    }

    pub fn toggle_housing_modal(&self) {
        self.dispatch(Action::ToggleHousingModal);
    }

    pub fn toggle_loan_modal(&self) {
        self.dispatch(Action::ToggleLoanModal);
    }

    /// Show the board with the housing choices open.
    pub fn open_housing_modal(&self) {
        self.navigate(Screen::Game);
        if !self.store.lock().state().show_housing_modal {
            self.toggle_housing_modal();
        }
    }

    /// Show the board with the loan panel open.
    pub fn open_loan_modal(&self) {
        self.navigate(Screen::Game);
        if !self.store.lock().state().show_loan_modal {
            self.toggle_loan_modal();
        }
    }

    pub fn navigate(&self, screen: Screen) {
        self.dispatch(Action::NavigateTo(screen));
    }

    // ---- standings ----

    /// Standings after `round`, or after the selected round when `None`.
    pub async fn leaderboard(&self, round: Option<u32>) -> Result<Leaderboard> {
        let game_code = self.game_code()?;
        let round = match round {
            Some(round) => self.select_round(round),
            None => self.store.lock().state().selected_round,
        };
        let started = self.current_epoch();
        self.call(&Endpoint::GetLeaderboard { game_code, round }, started).await
    }

    /// Returns the round actually selected (never below 1).
    pub fn select_round(&self, round: u32) -> u32 {
        self.dispatch(Action::SetSelectedRound(round));
        self.store.lock().state().selected_round
    }

    pub async fn history(&self) -> Result<PlayerHistory> {
        let (player_id, _) = self.player()?;
        let started = self.current_epoch();
        self.call(&Endpoint::GetPlayerHistory { player_id }, started).await
    }

    // ---- real-time ----

    /// Subscribe to the current game's topic and keep following whatever
    /// game the session moves to.
    pub async fn follow(&self) {
        let store = Arc::clone(&self.store);
        let updates = self.updates_tx.clone();
        self.channel.set_handler(move |event| {
            let screen = store.lock().state().current_screen;
            let effects = views::on_event(screen, &event);
            debug!(event = ?event.event_type, %screen, effects = effects.len(), "game event");
            let _ = updates.send((event, effects));
        });
        self.following.store(true, Ordering::SeqCst);
        self.refollow().await;
    }

    pub async fn unfollow(&self) {
        self.following.store(false, Ordering::SeqCst);
        self.channel.shutdown().await;
    }

    /// Wait for the next event and apply the effects the screen chose for it.
    pub async fn next_event(&self) -> Option<GameEvent> {
        let (event, effects) = self.updates_rx.lock().await.recv().await?;
        self.apply_effects(&effects).await;
        Some(event)
    }

    pub async fn apply_effects(&self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::Refetch(tag) => {
                    self.cache.invalidate(&[*tag]);
                    if *tag == Tag::Game {
                        if let Err(err) = self.game().await {
                            warn!(error = %err, "refetch after event failed");
                        }
                    }
                }
                Effect::Navigate(screen) => {
                    self.dispatch(Action::NavigateTo(*screen));
                }
                Effect::Toast { message, kind } => {
                    self.toast(message.clone(), *kind);
                }
            }
        }
    }

    // ---- admin ----

    pub fn is_admin(&self) -> bool {
        self.admin.load(Ordering::SeqCst)
    }

    /// Admin mode needs `MONOPOLY_ADMIN_PASSWORD`; without it every login fails.
    pub fn admin_login(&self, password: &str) -> Result<()> {
        let accepted = self.config.admin_password.as_deref().is_some_and(|expected| expected == password);
        if accepted {
            self.admin.store(true, Ordering::SeqCst);
            self.toast("Admin mode active", ToastKind::Success);
            Ok(())
        } else {
            self.admin.store(false, Ordering::SeqCst);
            self.toast("Wrong password", ToastKind::Error);
            Err(ClientError::Unauthorized)
        }
    }

    fn require_admin(&self) -> Result<()> {
        if self.is_admin() { Ok(()) } else { self.fail(ClientError::Unauthorized, "Admin mode required") }
    }

    pub async fn admin_games(&self) -> Result<Vec<AdminGame>> {
        self.require_admin()?;
        self.call(&Endpoint::AdminGames, self.current_epoch()).await
    }

    pub async fn admin_players(&self) -> Result<Vec<AdminPlayer>> {
        self.require_admin()?;
        self.call(&Endpoint::AdminPlayers, self.current_epoch()).await
    }

    /// Deleting the current player also ends this session.
    pub async fn delete_player(&self, player_id: &PlayerId) -> Result<()> {
        self.require_admin()?;
        let label = self.player_label(player_id);
        let endpoint = Endpoint::DeletePlayer { player_id: player_id.clone() };
        if let Err(err) = self.execute(&endpoint, self.current_epoch()).await {
            return self.fail(err, "Failed to delete player");
        }
        self.toast(format!("Player {label} removed"), ToastKind::Success);
        let is_me = self.store.lock().state().current_player_id.as_ref() == Some(player_id);
        if is_me {
            info!(%player_id, "current player deleted; leaving game");
            self.leave().await;
        }
        Ok(())
    }

    fn player_label(&self, player_id: &PlayerId) -> String {
        let from_game = self.cached_game().and_then(|g| g.player(player_id).map(|p| p.name.clone()));
        let from_admin = || {
            let value = self.cache.cached(&Endpoint::AdminPlayers)?;
            let players: Vec<AdminPlayer> = decode(value).ok()?;
            players.into_iter().find(|p| &p.id == player_id).map(|p| p.name)
        };
        from_game.or_else(from_admin).unwrap_or_else(|| player_id.to_string())
    }

    /// Remove every player from the current game's lobby.
    pub async fn delete_all_players(&self) -> Result<()> {
        self.require_admin()?;
        let game_code = match self.game_code() {
            Ok(code) => code,
            Err(err) => return self.fail(err, "Failed to delete all players"),
        };
        let endpoint = Endpoint::DeleteAllPlayersInGame { game_code };
        if let Err(err) = self.execute(&endpoint, self.current_epoch()).await {
            return self.fail(err, "Failed to delete all players");
        }
        self.toast("All players removed from lobby", ToastKind::Success);
        Ok(())
    }

    pub async fn delete_game(&self, game_code: &str) -> Result<()> {
        self.require_admin()?;
        let endpoint = Endpoint::DeleteGame { game_code: game_code.to_string() };
        if let Err(err) = self.execute(&endpoint, self.current_epoch()).await {
            return self.fail(err, "Failed to delete game");
        }
        self.toast(format!("Game {game_code} deleted"), ToastKind::Success);
        Ok(())
    }

    pub async fn force_end_game(&self, game_code: &str) -> Result<()> {
        self.require_admin()?;
        let endpoint = Endpoint::ForceEndGame { game_code: game_code.to_string() };
        if let Err(err) = self.execute(&endpoint, self.current_epoch()).await {
            return self.fail(err, "Failed to end game");
        }
        self.toast(format!("Game {game_code} ended"), ToastKind::Success);
        Ok(())
    }

    /// Best effort: individual failures are skipped. Returns how many went.
    pub async fn delete_all_games(&self) -> Result<usize> {
        let games = self.admin_games().await?;
        let mut deleted = 0;
        for game in games {
            let endpoint = Endpoint::DeleteGame { game_code: game.game_code.clone() };
            match self.cache.mutate(&self.api, &endpoint).await {
                Ok(_) => deleted += 1,
                Err(err) => debug!(game_code = %game.game_code, error = %err, "skipping game"),
            }
        }
        self.toast("Attempted to clear all games", ToastKind::Info);
        Ok(deleted)
    }

    /// Best effort, like [`App::delete_all_games`].
    pub async fn delete_all_players_everywhere(&self) -> Result<usize> {
        let players = self.admin_players().await?;
        let mut deleted = 0;
        for player in players {
            let endpoint = Endpoint::DeletePlayer { player_id: player.id.clone() };
            match self.cache.mutate(&self.api, &endpoint).await {
                Ok(_) => deleted += 1,
                Err(err) => debug!(player_id = %player.id, error = %err, "skipping player"),
            }
        }
        self.toast("Attempted to clear all players", ToastKind::Info);
        Ok(deleted)
    }

    // ---- rendering ----

    /// Render the current screen with fresh data, followed by pending toasts.
    pub async fn render(&self) -> String {
        let screen = self.store.lock().state().current_screen;
        let game = match screen {
            Screen::Lobby | Screen::Game | Screen::Leaderboard => self.game().await.ok(),
            Screen::Landing | Screen::History => None,
        };
        let leaderboard = match screen {
            Screen::Leaderboard => self.leaderboard(None).await.ok(),
            _ => None,
        };
        let history = match screen {
            Screen::History => self.history().await.ok(),
            _ => None,
        };
        let saved = self.saved_session();
        let (admin_games, admin_players) = if self.is_admin() && screen == Screen::Landing {
            (self.admin_games().await.ok(), self.admin_players().await.ok())
        } else {
            (None, None)
        };
        let loan_preview = self.loan_preview.lock().clone();

        // the lobby redirect above may have moved the screen
        let state = self.state();
        let model = ViewModel::new(&state)
            .with_game(game.as_ref())
            .with_leaderboard(leaderboard.as_ref())
            .with_history(history.as_ref())
            .with_loan_preview(loan_preview.as_ref())
            .with_saved_session(saved.as_ref())
            .with_admin(admin_games.as_deref(), admin_players.as_deref());
        let mut output = router::render(&model);
        let toasts = views::render_toasts(&state);
        if !toasts.is_empty() {
            output.push('\n');
            output.push_str(&toasts);
        }
        output
    }

    pub async fn shutdown(&self) {
        self.unfollow().await;
    }
}

impl<C: Connector> std::fmt::Debug for App<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("api_url", &self.config.api_url)
            .field("admin", &self.is_admin())
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}
