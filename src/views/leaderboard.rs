use crate::model::LeaderboardEntry;
use crate::util::format::naira_from_kobo;
use crate::views::{rule, ViewModel};

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

pub fn render(model: &ViewModel<'_>) -> String {
    let mut output = String::new();
    rule(&mut output, "Leaderboard");

    let total = model.game.map(|g| g.total_rounds).unwrap_or(10);
    output.push_str(&format!(
        "Round {} of {total}  (`monopoly leaderboard <round>` to change)\n\n",
        model.state.selected_round
    ));

    let standings = model.leaderboard.map(|l| l.standings.as_slice()).unwrap_or_default();
    if standings.is_empty() {
        output.push_str("Game history empty\n");
        return output;
    }

    if standings.len() >= 3 {
        render_podium(&mut output, &standings[..3]);
    }

    output.push_str(&format!("{:<4} {:<16} {:>16} {:>16} {:>16}\n", "#", "Player", "Net worth", "Cash", "Debt"));
    let me = model.state.current_player_id.as_ref();
    for (rank, entry) in standings.iter().enumerate() {
        let marker = if Some(&entry.player_id) == me { " *" } else { "" };
        output.push_str(&format!(
            "{:<4} {:<16} {:>16} {:>16} {:>16}{marker}\n",
            rank + 1,
            entry.player_name,
            naira_from_kobo(entry.net_worth_kobo),
            naira_from_kobo(entry.cash_balance_kobo),
            naira_from_kobo(entry.loan_balance_kobo)
        ));
    }
    output
}

fn render_podium(output: &mut String, top: &[LeaderboardEntry]) {
    for (medal, entry) in MEDALS.iter().zip(top) {
        output.push_str(&format!("{medal} {}  {}\n", entry.player_name, naira_from_kobo(entry.net_worth_kobo)));
    }
    output.push('\n');
}
