use crate::util::format::initial;
use crate::views::{rule, ViewModel};

const FEATURES: [(&str, &str, &str); 3] = [
    ("🎲", "Dice Events", "Random events that can make or break your finances"),
    ("🏠", "Housing Choices", "From parent's house to luxury Lekki apartment"),
    ("📊", "Leaderboard", "Track everyone's net worth round by round"),
];

pub fn render(model: &ViewModel<'_>) -> String {
    let mut output = String::new();
    rule(&mut output, "MONOPOLY · The Game of Life");
    output.push('\n');

    if let Some(saved) = model.saved_session.filter(|s| s.is_resumable()) {
        let name = saved.current_player_name.as_deref().unwrap_or("player");
        let code = saved.game_code.as_deref().unwrap_or("");
        output.push_str(&format!("Saved game: {name} @ {code}\n"));
        output.push_str("  `monopoly resume` to continue, `monopoly forget` to drop it\n\n");
    }

    output.push_str("  `monopoly create`              start a new game\n");
    output.push_str("  `monopoly join <code> <name>`  join a friend's game\n\n");

    for (icon, title, desc) in FEATURES {
        output.push_str(&format!("{icon} {title}: {desc}\n"));
    }

    if let Some(games) = model.admin_games {
        output.push_str("\nGames List\n");
        if games.is_empty() {
            output.push_str("  (none)\n");
        }
        for game in games {
            output.push_str(&format!(
                "  {:<8} {:<12} {} User(s) Connected\n",
                game.game_code,
                game.status.as_deref().unwrap_or("?"),
                game.players.len()
            ));
        }
    }
    if let Some(players) = model.admin_players {
        output.push_str("\nPlayers Registry\n");
        if players.is_empty() {
            output.push_str("  (none)\n");
        }
        for player in players {
            output.push_str(&format!("  [{}] {}  ID: {}\n", initial(&player.name), player.name, player.id));
        }
    }
    output
}
