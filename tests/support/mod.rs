//! In-process stand-in for the game backend: REST under `/monopoly` and a
//! bare-bones STOMP broker on `/ws/websocket`.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use monopoly_client::{App, Config};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::{broadcast, watch};

const STARTING_CASH: i64 = 1_000_000;
const STARTING_LOAN: i64 = 500_000;
pub const ADMIN_PASSWORD: &str = "letmein";

#[derive(Debug, Clone)]
struct MockPlayer {
    id: u64,
    name: String,
    game_code: String,
    housing: Option<String>,
    cash: i64,
    loan: i64,
    played_round: Option<u32>,
    rounds: Vec<Value>,
}

#[derive(Debug)]
struct MockGame {
    status: &'static str,
    round: u32,
    players: Vec<u64>,
}

#[derive(Default)]
struct World {
    games: HashMap<String, MockGame>,
    players: HashMap<u64, MockPlayer>,
    standings: HashMap<(String, u32), Vec<(u64, i64)>>,
    /// Game codes and player ids whose admin delete fails.
    undeletable: HashSet<String>,
    next_game: u32,
    next_player: u64,
}

struct Shared {
    world: Mutex<World>,
    game_reads: AtomicUsize,
    plays: AtomicUsize,
    messages: AtomicUsize,
    /// (destination, frame text). `None` goes to every subscribed socket.
    frames: broadcast::Sender<(Option<String>, String)>,
    subscribers: watch::Sender<usize>,
}

pub struct MockBackend {
    pub api_url: String,
    pub ws_url: String,
    shared: Arc<Shared>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let (frames, _) = broadcast::channel(64);
        let (subscribers, _) = watch::channel(0);
        let shared = Arc::new(Shared {
            world: Mutex::new(World::default()),
            game_reads: AtomicUsize::new(0),
            plays: AtomicUsize::new(0),
            messages: AtomicUsize::new(0),
            frames,
            subscribers,
        });

        let router = Router::new()
            .route("/monopoly/games/createGame", post(create_game))
            .route("/monopoly/games/:code", get(get_game))
            .route("/monopoly/games/:code/join", post(join_game))
            .route("/monopoly/games/:code/start", post(start_game))
            .route("/monopoly/games/players/:id/housing", post(pick_housing))
            .route("/monopoly/rounds/players/:id/play", post(play_round))
            .route("/monopoly/rounds/:code/leaderboard/:round", get(leaderboard))
            .route("/monopoly/players/:id/history", get(player_history))
            .route("/monopoly/players/:id/loan/preview", post(preview_loan))
            .route("/monopoly/admin/games", get(admin_games))
            .route("/monopoly/admin/games/:code", delete(admin_delete_game))
            .route("/monopoly/admin/games/:code/players", delete(admin_clear_lobby))
            .route("/monopoly/admin/games/:code/force-end", patch(admin_force_end))
            .route("/monopoly/admin/players", get(admin_players))
            .route("/monopoly/admin/players/:id", delete(admin_delete_player))
            .route("/ws/websocket", get(stomp))
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        Self {
            api_url: format!("http://{addr}/monopoly"),
            ws_url: format!("ws://{addr}/ws/websocket"),
            shared,
        }
    }

    pub fn config(&self, session_file: PathBuf) -> Config {
        Config {
            api_url: self.api_url.clone(),
            ws_url: self.ws_url.clone(),
            session_file,
            admin_password: None,
            toast_duration: Duration::from_secs(4),
        }
    }

    pub fn app(&self, session_file: PathBuf) -> App {
        App::new(self.config(session_file)).unwrap()
    }

    /// An app with admin mode unlocked.
    pub fn admin_app(&self, session_file: PathBuf) -> App {
        let config = Config { admin_password: Some(ADMIN_PASSWORD.into()), ..self.config(session_file) };
        let app = App::new(config).unwrap();
        app.admin_login(ADMIN_PASSWORD).unwrap();
        app
    }

    /// Make admin deletes of this game code or player id fail.
    pub fn refuse_delete(&self, key: &str) {
        self.shared.world.lock().undeletable.insert(key.to_string());
    }

    pub fn player_count(&self) -> usize {
        self.shared.world.lock().players.len()
    }

    pub fn game_reads(&self) -> usize {
        self.shared.game_reads.load(Ordering::SeqCst)
    }

    pub fn plays(&self) -> usize {
        self.shared.plays.load(Ordering::SeqCst)
    }

    pub fn subscribers(&self) -> watch::Receiver<usize> {
        self.shared.subscribers.subscribe()
    }

    /// Publish an event on the game's topic.
    pub fn publish(&self, game_code: &str, event: Value) {
        publish(&self.shared, game_code, &event.to_string());
    }

    /// Publish a MESSAGE frame with an arbitrary body.
    pub fn publish_body(&self, game_code: &str, body: &str) {
        publish(&self.shared, game_code, body);
    }

    /// Push raw text to every subscribed socket.
    pub fn publish_raw(&self, text: &str) {
        let _ = self.shared.frames.send((None, text.to_string()));
    }
}

fn topic(game_code: &str) -> String {
    format!("/topic/game/{game_code}")
}

fn publish(shared: &Shared, game_code: &str, body: &str) {
    let destination = topic(game_code);
    let message_id = shared.messages.fetch_add(1, Ordering::SeqCst);
    let frame = format!(
        "MESSAGE\ndestination:{destination}\nsubscription:sub-0\nmessage-id:{message_id}\ncontent-type:application/json\n\n{body}\0"
    );
    let _ = shared.frames.send((Some(destination), frame));
}

fn rejected(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn naira_text(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₦{grouped}")
}

async fn create_game(State(shared): State<Arc<Shared>>) -> Json<Value> {
    let mut world = shared.world.lock();
    world.next_game += 1;
    let code = format!("GAME{:02}", world.next_game);
    world
        .games
        .insert(code.clone(), MockGame { status: "LOBBY", round: 1, players: Vec::new() });
    Json(json!({ "data": { "gameCode": code } }))
}

async fn get_game(State(shared): State<Arc<Shared>>, Path(code): Path<String>) -> Response {
    shared.game_reads.fetch_add(1, Ordering::SeqCst);
    let world = shared.world.lock();
    let Some(game) = world.games.get(&code) else {
        return rejected(StatusCode::NOT_FOUND, "Game not found");
    };
    let players: Vec<Value> = game
        .players
        .iter()
        .filter_map(|id| world.players.get(id))
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "status": "ACTIVE",
                "housing": p.housing,
                "cashBalance": naira_text(p.cash),
                "loanBalance": naira_text(p.loan),
                "netWorth": naira_text(p.cash),
                "creditScore": 650
            })
        })
        .collect();
    Json(json!({
        "gameCode": code,
        "status": game.status,
        "currentRound": game.round,
        "totalRounds": 10,
        "maxPlayers": 4,
        "players": players
    }))
    .into_response()
}

async fn join_game(
    State(shared): State<Arc<Shared>>,
    Path(code): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let name = body["playerName"].as_str().unwrap_or_default().to_string();
    let id = {
        let mut world = shared.world.lock();
        world.next_player += 1;
        let id = world.next_player;
        let Some(game) = world.games.get_mut(&code) else {
            return rejected(StatusCode::NOT_FOUND, "Game not found");
        };
        if game.status != "LOBBY" {
            return rejected(StatusCode::BAD_REQUEST, "Game already started");
        }
        game.players.push(id);
        world.players.insert(
            id,
            MockPlayer {
                id,
                name: name.clone(),
                game_code: code.clone(),
                housing: None,
                cash: STARTING_CASH,
                loan: STARTING_LOAN,
                played_round: None,
                rounds: Vec::new(),
            },
        );
        id
    };
    publish(
        &shared,
        &code,
        &json!({ "eventType": "PLAYER_JOINED", "gameCode": code, "playerId": id, "playerName": name }).to_string(),
    );
    Json(json!({ "id": id, "name": name })).into_response()
}

async fn start_game(State(shared): State<Arc<Shared>>, Path(code): Path<String>) -> Response {
    {
        let mut world = shared.world.lock();
        let Some(game) = world.games.get_mut(&code) else {
            return rejected(StatusCode::NOT_FOUND, "Game not found");
        };
        game.status = "IN_PROGRESS";
    }
    publish(&shared, &code, &json!({ "eventType": "GAME_STARTED", "gameCode": code }).to_string());
    Json(json!({ "data": { "gameCode": code, "status": "IN_PROGRESS" } })).into_response()
}

async fn pick_housing(
    State(shared): State<Arc<Shared>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut world = shared.world.lock();
    let Some(player) = world.players.get_mut(&id) else {
        return rejected(StatusCode::NOT_FOUND, "Player not found");
    };
    player.housing = body["housingType"].as_str().map(str::to_string);
    StatusCode::OK.into_response()
}

fn housing_cost(housing: Option<&str>) -> i64 {
    match housing {
        Some("SHARED_APARTMENT") => 200_000,
        Some("SINGLE_APARTMENT") => 500_000,
        Some("LUXURY_APARTMENT_NINU_LEKKI") => 1_500_000,
        _ => 0,
    }
}

async fn play_round(
    State(shared): State<Arc<Shared>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    shared.plays.fetch_add(1, Ordering::SeqCst);
    let loan = body["loanPaymentNaira"].as_i64().unwrap_or(0);
    let (code, result) = {
        let mut world = shared.world.lock();
        let Some(player) = world.players.get(&id).cloned() else {
            return rejected(StatusCode::NOT_FOUND, "Player not found");
        };
        let Some(round) = world.games.get(&player.game_code).map(|g| g.round) else {
            return rejected(StatusCode::NOT_FOUND, "Game not found");
        };
        if player.played_round == Some(round) {
            return rejected(StatusCode::CONFLICT, "Already played this round");
        }
        let housing = housing_cost(player.housing.as_deref());
        let cash = player.cash + 400_000 - housing - 100_000 + 200_000 - loan;
        if let Some(p) = world.players.get_mut(&id) {
            p.cash = cash;
            p.loan = (p.loan - loan).max(0);
            p.played_round = Some(round);
            p.rounds.push(json!({
                "roundNumber": round,
                "diceRoll": 4,
                "eventType": "GOOD_INVESTMENT",
                "eventDescription": "Your stocks went up",
                "eventAmount": naira_text(200_000),
                "housingType": p.housing,
                "salaryReceived": naira_text(400_000),
                "housingCost": naira_text(housing),
                "survivalCost": naira_text(100_000),
                "loanPayment": naira_text(loan),
                "cashBalanceEnd": naira_text(cash),
                "netWorth": naira_text(cash - p.loan)
            }));
        }
        let standings = world.standings.entry((player.game_code.clone(), round)).or_default();
        standings.push((id, cash));
        standings.sort_by(|a, b| b.1.cmp(&a.1));
        let result = json!({
            "roundNumber": round,
            "diceRoll": 4,
            "eventType": "GOOD_INVESTMENT",
            "eventDescription": "Your stocks went up",
            "eventAmount": 200000.0,
            "salaryReceived": 400000,
            "housingCost": housing,
            "survivalCost": 100000,
            "loanPayment": loan,
            "cashBalanceEnd": cash
        });
        (player.game_code, result)
    };
    publish(
        &shared,
        &code,
        &json!({ "eventType": "ROUND_COMPLETED", "gameCode": code, "playerId": id }).to_string(),
    );
    Json(json!({ "data": result })).into_response()
}

async fn leaderboard(State(shared): State<Arc<Shared>>, Path((code, round)): Path<(String, u32)>) -> Json<Value> {
    let world = shared.world.lock();
    let standings: Vec<Value> = world
        .standings
        .get(&(code, round))
        .map(|rows| {
            rows.iter()
                .map(|(id, cash)| {
                    let name = world.players.get(id).map(|p| p.name.clone()).unwrap_or_default();
                    json!({
                        "playerId": id,
                        "playerName": name,
                        "netWorthKobo": cash * 100,
                        "cashBalanceKobo": cash * 100,
                        "loanBalanceKobo": 0
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    Json(json!({ "roundNumber": round, "standings": standings }))
}

async fn player_history(State(shared): State<Arc<Shared>>, Path(id): Path<u64>) -> Response {
    let world = shared.world.lock();
    let Some(player) = world.players.get(&id) else {
        return rejected(StatusCode::NOT_FOUND, "Player not found");
    };
    Json(json!({
        "currentCashBalance": naira_text(player.cash),
        "currentLoanBalance": naira_text(player.loan),
        "currentNetWorth": naira_text(player.cash - player.loan),
        "creditScore": 650,
        "rounds": player.rounds
    }))
    .into_response()
}

/// 10% interest on whatever stays unpaid; nothing is stored.
async fn preview_loan(
    State(shared): State<Arc<Shared>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let payment = body["proposedPaymentNaira"].as_i64().unwrap_or(0);
    let world = shared.world.lock();
    let Some(player) = world.players.get(&id) else {
        return rejected(StatusCode::NOT_FOUND, "Player not found");
    };
    let after = (player.loan - payment).max(0);
    let interest = after / 10;
    Json(json!({ "data": {
        "currentLoanBalance": naira_text(player.loan),
        "proposedPayment": naira_text(payment),
        "balanceAfterPayment": naira_text(after),
        "interestIfNotFullyPaid": naira_text(interest),
        "newBalanceNextRound": naira_text(after + interest),
        "tip": "Paying more now means less interest later"
    }}))
    .into_response()
}

async fn admin_games(State(shared): State<Arc<Shared>>) -> Json<Value> {
    let world = shared.world.lock();
    let mut codes: Vec<&String> = world.games.keys().collect();
    codes.sort();
    let games: Vec<Value> = codes
        .into_iter()
        .map(|code| {
            let game = &world.games[code];
            json!({ "gameCode": code, "status": game.status, "players": game.players })
        })
        .collect();
    Json(json!(games))
}

async fn admin_players(State(shared): State<Arc<Shared>>) -> Json<Value> {
    let world = shared.world.lock();
    let mut players: Vec<&MockPlayer> = world.players.values().collect();
    players.sort_by_key(|p| p.id);
    Json(json!(players.iter().map(|p| json!({ "id": p.id, "name": p.name })).collect::<Vec<_>>()))
}

async fn admin_delete_game(State(shared): State<Arc<Shared>>, Path(code): Path<String>) -> Response {
    let mut world = shared.world.lock();
    if world.undeletable.contains(&code) {
        return rejected(StatusCode::INTERNAL_SERVER_ERROR, "Delete failed");
    }
    let Some(game) = world.games.remove(&code) else {
        return rejected(StatusCode::NOT_FOUND, "Game not found");
    };
    for id in game.players {
        world.players.remove(&id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn admin_clear_lobby(State(shared): State<Arc<Shared>>, Path(code): Path<String>) -> Response {
    let mut world = shared.world.lock();
    let Some(game) = world.games.get_mut(&code) else {
        return rejected(StatusCode::NOT_FOUND, "Game not found");
    };
    let removed = std::mem::take(&mut game.players);
    for id in removed {
        world.players.remove(&id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn admin_force_end(State(shared): State<Arc<Shared>>, Path(code): Path<String>) -> Response {
    {
        let mut world = shared.world.lock();
        let Some(game) = world.games.get_mut(&code) else {
            return rejected(StatusCode::NOT_FOUND, "Game not found");
        };
        game.status = "FINISHED";
    }
    publish(&shared, &code, &json!({ "eventType": "GAME_FINISHED", "gameCode": code }).to_string());
    StatusCode::OK.into_response()
}

async fn admin_delete_player(State(shared): State<Arc<Shared>>, Path(id): Path<u64>) -> Response {
    let mut world = shared.world.lock();
    if world.undeletable.contains(&id.to_string()) {
        return rejected(StatusCode::INTERNAL_SERVER_ERROR, "Delete failed");
    }
    let Some(player) = world.players.remove(&id) else {
        return rejected(StatusCode::NOT_FOUND, "Player not found");
    };
    if let Some(game) = world.games.get_mut(&player.game_code) {
        game.players.retain(|p| *p != id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn stomp(State(shared): State<Arc<Shared>>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_stomp(socket, shared))
}

fn header<'a>(frame: &'a str, name: &str) -> Option<&'a str> {
    frame
        .lines()
        .skip(1)
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(':'))
}

async fn serve_stomp(mut socket: WebSocket, shared: Arc<Shared>) {
    let mut frames = shared.frames.subscribe();
    let mut subscribed: Option<String> = None;

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                let Some(Ok(message)) = incoming else { break };
                let Message::Text(text) = message else { continue };
                match text.lines().next().unwrap_or_default().trim() {
                    "CONNECT" | "STOMP" => {
                        let reply = "CONNECTED\nversion:1.2\nheart-beat:0,0\n\n\0".to_string();
                        if socket.send(Message::Text(reply)).await.is_err() {
                            break;
                        }
                    }
                    "SUBSCRIBE" => {
                        subscribed = header(&text, "destination").map(str::to_string);
                        shared.subscribers.send_modify(|n| *n += 1);
                    }
                    "UNSUBSCRIBE" => {
                        if subscribed.take().is_some() {
                            shared.subscribers.send_modify(|n| *n -= 1);
                        }
                    }
                    "DISCONNECT" => break,
                    _ => {}
                }
            }
            published = frames.recv() => {
                let (destination, text) = match published {
                    Ok(item) => item,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let Some(topic) = subscribed.as_deref() else { continue };
                if destination.as_deref().is_none_or(|d| d == topic)
                    && socket.send(Message::Text(text)).await.is_err()
                {
                    break;
                }
            }
        }
    }

    if subscribed.is_some() {
        shared.subscribers.send_modify(|n| *n -= 1);
    }
}
