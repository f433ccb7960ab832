use crate::api::Tag;
use crate::model::{Game, GameStatus};
use crate::router::Screen;
use crate::util::format::initial;
use crate::views::{rule, Effect, ViewModel};
use crate::ws::{GameEvent, GameEventType};

pub const MIN_PLAYERS_TO_START: usize = 2;

pub fn on_event(event: &GameEvent) -> Vec<Effect> {
    match event.event_type {
        GameEventType::PlayerJoined => vec![Effect::Refetch(Tag::Game)],
        GameEventType::GameStarted => vec![Effect::Navigate(Screen::Game)],
        _ => Vec::new(),
    }
}

/// A game that already started moves everyone still waiting onto the board.
pub fn redirect(game: &Game) -> Option<Screen> {
    (game.status == GameStatus::InProgress).then_some(Screen::Game)
}

pub fn render(model: &ViewModel<'_>) -> String {
    let mut output = String::new();
    let code = model.state.game_code.as_deref().unwrap_or("------");
    rule(&mut output, &format!("Lobby {code}"));

    let Some(game) = model.game else {
        output.push_str("Loading lobby...\n");
        return output;
    };

    output.push_str(&format!("Players {} / {}\n\n", game.players.len(), game.max_players));
    let me = model.state.current_player_id.as_ref();
    for player in &game.players {
        let marker = if Some(&player.id) == me { "  YOU" } else { "" };
        output.push_str(&format!("  [{}] {}{marker}\n", initial(&player.name), player.name));
    }
    if game.players.is_empty() {
        output.push_str("  Waiting for players...\n");
    }
    output.push('\n');

    if !model.state.has_joined() {
        output.push_str(&format!("Enter your name to join: `monopoly join {code} <name>`\n"));
    } else if game.players.len() < MIN_PLAYERS_TO_START {
        output.push_str(&format!("Need at least {MIN_PLAYERS_TO_START} players to start\n"));
    } else {
        output.push_str("Ready to launch: `monopoly start`\n");
    }
    output
}
