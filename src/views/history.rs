use crate::model::{shown, HistoryRound};
use crate::views::{rule, ViewModel};

pub fn render(model: &ViewModel<'_>) -> String {
    let mut output = String::new();
    let name = model.state.current_player_name.as_deref().unwrap_or("Player");
    rule(&mut output, &format!("{name}'s history"));

    let Some(history) = model.history else {
        output.push_str("No history loaded\n");
        return output;
    };

    output.push_str(&format!(
        "Cash {}  Debt {}  Worth {}  Credit {}\n\n",
        shown(&history.current_cash_balance),
        shown(&history.current_loan_balance),
        shown(&history.current_net_worth),
        shown(&history.credit_score)
    ));

    if history.rounds.is_empty() {
        output.push_str("No rounds played yet\n");
    }
    for round in &history.rounds {
        render_round(&mut output, round);
    }
    output
}

fn render_round(output: &mut String, round: &HistoryRound) {
    let event = round
        .event_type
        .map(|e| format!("{} {e}", e.icon()))
        .unwrap_or_else(|| "—".to_string());
    let dice = round.dice_roll.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
    output.push_str(&format!("Round {} · dice {dice} · {event}\n", round.round_number));
    if let Some(desc) = round.event_description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("  {desc}\n"));
    }
    if let Some(housing) = round.housing_type {
        output.push_str(&format!("  Home {}\n", housing.label()));
    }
    output.push_str(&format!(
        "  Salary {}  Housing {}  Survival {}  Loan {}  Event {}\n",
        shown(&round.salary_received),
        shown(&round.housing_cost),
        shown(&round.survival_cost),
        shown(&round.loan_payment),
        shown(&round.event_amount)
    ));
    output.push_str(&format!(
        "  Cash {}  Worth {}\n",
        shown(&round.cash_balance_end),
        shown(&round.net_worth)
    ));
}
