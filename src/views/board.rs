use crate::api::Tag;
use crate::model::{shown, HousingType, PlayerStatus, RoundResult};
use crate::router::Screen;
use crate::toast::ToastKind;
use crate::util::format::{naira, signed_naira};
use crate::views::{rule, Effect, ViewModel};
use crate::ws::{GameEvent, GameEventType};

pub const ALL_PLAYERS_DONE_MESSAGE: &str = "Everyone has played! Ready for next round.";
pub const GAME_FINISHED_MESSAGE: &str = "The game has finished! 🏁";

pub fn on_event(event: &GameEvent) -> Vec<Effect> {
    match event.event_type {
        GameEventType::RoundCompleted => vec![Effect::Refetch(Tag::Game)],
        GameEventType::AllPlayersDone => vec![
            Effect::Refetch(Tag::Game),
            Effect::Toast { message: ALL_PLAYERS_DONE_MESSAGE.into(), kind: ToastKind::Info },
        ],
        GameEventType::GameFinished => vec![
            Effect::Refetch(Tag::Game),
            Effect::Toast { message: GAME_FINISHED_MESSAGE.into(), kind: ToastKind::Success },
            Effect::Navigate(Screen::Leaderboard),
        ],
        _ => Vec::new(),
    }
}

/// Whether the dice may be rolled right now.
pub fn can_roll(model: &ViewModel<'_>) -> bool {
    if model.state.is_rolling {
        return false;
    }
    let (Some(game), Some(id)) = (model.game, model.state.current_player_id.as_ref()) else {
        return false;
    };
    game.player(id).is_some_and(|p| p.status != PlayerStatus::Eliminated)
}

pub fn render(model: &ViewModel<'_>) -> String {
    let mut output = String::new();
    let (current, total) = model.game.map(|g| (g.current_round, g.total_rounds)).unwrap_or((1, 10));
    rule(&mut output, &format!("Round {current}/{total}"));

    let me = model
        .game
        .zip(model.state.current_player_id.as_ref())
        .and_then(|(game, id)| game.player(id));

    match me {
        Some(player) => {
            output.push_str(&format!("{} ({})\n", player.name, player.status));
            output.push_str(&format!(
                "  Cash {}  Debt {}  Worth {}  Credit {}\n",
                shown(&player.cash_balance),
                shown(&player.loan_balance),
                shown(&player.net_worth),
                shown(&player.credit_score)
            ));
            match player.housing {
                Some(housing) => output.push_str(&format!("  Home {} {}\n", housing.icon(), housing.label())),
                None => output.push_str("  Home not chosen: `monopoly housing` lists the options\n"),
            }
        }
        None => output.push_str("Spectating\n"),
    }
    output.push('\n');

    if let Some(game) = model.game {
        output.push_str("Players\n");
        for player in &game.players {
            output.push_str(&format!(
                "  {:<16} {:<12} {}\n",
                player.name,
                player.status.to_string(),
                shown(&player.net_worth)
            ));
        }
        output.push('\n');
    }

    render_dice(&mut output, model);
    if let Some(result) = &model.state.last_round_result {
        render_result(&mut output, result);
    }
    if model.state.show_housing_modal {
        render_housing_choices(&mut output);
    }
    if model.state.show_loan_modal {
        render_loan_preview(&mut output, model);
    }
    output
}

fn render_dice(output: &mut String, model: &ViewModel<'_>) {
    if model.state.is_rolling {
        output.push_str("Dice: rolling...\n");
    } else if let Some(value) = model.state.dice_value {
        output.push_str(&format!("Dice: {value}\n"));
    } else if can_roll(model) {
        output.push_str("Dice: ready, `monopoly play`\n");
    } else {
        output.push_str("Dice: unavailable\n");
    }
}

fn render_result(output: &mut String, result: &RoundResult) {
    output.push_str(&format!(
        "\nRound {} · rolled {} · {} {}\n",
        result.round_number,
        result.dice_roll,
        result.event_type.icon(),
        result.event_type
    ));
    if !result.event_description.is_empty() {
        output.push_str(&format!("  {}\n", result.event_description));
    }
    output.push_str(&format!("  Salary   {}\n", signed_naira(result.salary_received)));
    output.push_str(&format!("  Housing  {}\n", signed_naira(result.housing_cost.saturating_neg())));
    output.push_str(&format!("  Survival {}\n", signed_naira(result.survival_cost.saturating_neg())));
    if result.loan_payment != 0 {
        output.push_str(&format!("  Loan     {}\n", signed_naira(result.loan_payment.saturating_neg())));
    }
    output.push_str(&format!("  Event    {}\n", signed_naira(result.event_amount)));
    output.push_str(&format!("  Cash at end {}\n", naira(result.cash_balance_end)));
}

fn render_housing_choices(output: &mut String) {
    output.push_str("\nChoose your home\n");
    for tier in HousingType::ALL {
        output.push_str(&format!(
            "  {} {:<18} {:>11}/round  {}\n",
            tier.icon(),
            tier.label(),
            tier.cost(),
            tier.description()
        ));
    }
}

fn render_loan_preview(output: &mut String, model: &ViewModel<'_>) {
    output.push_str("\nLoan repayment\n");
    let Some(preview) = model.loan_preview else {
        output.push_str("  `monopoly preview-loan <amount>` to see the effect of a payment\n");
        return;
    };
    output.push_str(&format!("  Current balance     {}\n", shown(&preview.current_loan_balance)));
    output.push_str(&format!("  Payment             {}\n", shown(&preview.proposed_payment)));
    output.push_str(&format!("  After payment       {}\n", shown(&preview.balance_after_payment)));
    output.push_str(&format!("  Interest if unpaid  {}\n", shown(&preview.interest_if_not_fully_paid)));
    output.push_str(&format!("  Next round balance  {}\n", shown(&preview.new_balance_next_round)));
    if let Some(tip) = &preview.tip {
        output.push_str(&format!("  Tip: {tip}\n"));
    }
}
