//! Full REST flows against the in-process backend.

#![allow(clippy::unwrap_used)]

mod support;

use monopoly_client::model::{GameStatus, HousingType, PlayerId};
use monopoly_client::state::{FileSessionStore, SessionStore};
use monopoly_client::toast::ToastKind;
use monopoly_client::util::format::naira;
use monopoly_client::{ClientError, Screen};
use support::MockBackend;

#[tokio::test]
async fn two_players_play_a_round() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let host = backend.app(dir.path().join("host.json"));
    let guest = backend.app(dir.path().join("guest.json"));

    let code = host.create_game().await.unwrap();
    assert_eq!(host.state().current_screen, Screen::Lobby);
    let ada = host.join_game(&code, "Ada").await.unwrap();
    guest.join_game(&code, "Bo").await.unwrap();

    host.start_game().await.unwrap();
    assert_eq!(host.state().current_screen, Screen::Game);

    host.pick_housing(HousingType::SharedApartment).await.unwrap();
    let result = host.play_round(50_000).await.unwrap();
    assert_eq!(result.round_number, 1);
    assert_eq!(result.event_amount, 200_000);
    assert_eq!(result.housing_cost, 200_000);
    assert_eq!(result.cash_balance_end, 1_000_000 + 400_000 - 200_000 - 100_000 + 200_000 - 50_000);

    let state = host.state();
    assert_eq!(state.dice_value, Some(4));
    assert!(!state.is_rolling);
    assert_eq!(state.last_round_result.as_ref(), Some(&result));

    let board = host.leaderboard(Some(1)).await.unwrap();
    let top = &board.standings[0];
    assert_eq!(top.player_id, ada.id);
    assert_eq!(top.player_name, "Ada");
    assert_eq!(top.net_worth_kobo, result.cash_balance_end * 100);

    host.navigate(Screen::Leaderboard);
    let screen = host.render().await;
    assert!(screen.contains(&naira(result.cash_balance_end)), "{screen}");
}

#[tokio::test]
async fn joined_session_survives_restart() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let code = {
        let app = backend.app(path.clone());
        let code = app.create_game().await.unwrap();
        app.join_game(&code, "Ada").await.unwrap();
        app.navigate(Screen::Landing);
        code
    };

    let saved = FileSessionStore::new(&path).load().unwrap();
    assert_eq!(saved.game_code.as_deref(), Some(code.as_str()));
    assert_eq!(saved.current_player_name.as_deref(), Some("Ada"));

    let app = backend.app(path.clone());
    assert!(app.saved_session().is_some());
    assert_eq!(app.resume().await.unwrap(), Screen::Lobby);
    let state = app.state();
    assert_eq!(state.game_code.as_deref(), Some(code.as_str()));
    assert_eq!(state.current_player_name.as_deref(), Some("Ada"));

    app.forget().await;
    assert!(!path.exists());
    assert!(app.saved_session().is_none());
}

#[tokio::test]
async fn backend_rejection_is_shown_verbatim() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = backend.app(dir.path().join("s.json"));

    let code = app.create_game().await.unwrap();
    app.join_game(&code, "Ada").await.unwrap();
    app.play_round(0).await.unwrap();

    let err = app.play_round(0).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { .. }));
    assert_eq!(backend.plays(), 2);

    let last = app.state().toasts.iter().last().cloned().unwrap();
    assert_eq!(last.message, "Already played this round");
    assert_eq!(last.kind, ToastKind::Error);
    assert_eq!(app.state().dice_value, None);

    let err = app.join_game("NOPE00", "Bo").await.unwrap_err();
    assert_eq!(err.user_message("Failed to join game"), "Game not found");
    // the failed join leaves the current session alone
    assert_eq!(app.state().game_code.as_deref(), Some(code.as_str()));
}

#[tokio::test]
async fn mutation_marks_game_for_refetch() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = backend.app(dir.path().join("s.json"));

    let code = app.create_game().await.unwrap();
    app.join_game(&code, "Ada").await.unwrap();

    let before = app.game().await.unwrap();
    app.game().await.unwrap();
    assert_eq!(backend.game_reads(), 1);
    assert_eq!(before.players[0].housing, None);

    app.pick_housing(HousingType::LuxuryApartmentNinuLekki).await.unwrap();
    let after = app.game().await.unwrap();
    assert_eq!(backend.game_reads(), 2);
    assert_eq!(after.players[0].id, PlayerId::from("1"));
    assert_eq!(after.players[0].housing, Some(HousingType::LuxuryApartmentNinuLekki));
}

#[tokio::test]
async fn start_needs_two_players() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = backend.app(dir.path().join("s.json"));

    let code = app.create_game().await.unwrap();
    app.join_game(&code, "Ada").await.unwrap();

    let err = app.start_game().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));
    assert_eq!(app.state().current_screen, Screen::Lobby);
}

#[tokio::test]
async fn loan_preview_shows_on_board_without_paying() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = backend.app(dir.path().join("s.json"));

    let code = app.create_game().await.unwrap();
    app.join_game(&code, "Ada").await.unwrap();
    app.open_loan_modal();

    let preview = app.preview_loan(200_000).await.unwrap();
    assert_eq!(preview.balance_after_payment.unwrap().to_string(), "₦300,000");
    assert_eq!(preview.new_balance_next_round.unwrap().to_string(), "₦330,000");

    let board = app.render().await;
    assert!(board.contains("Loan repayment"), "{board}");
    assert!(board.contains("After payment       ₦300,000"), "{board}");
    assert!(board.contains("Tip: Paying more now"), "{board}");

    let game = app.game().await.unwrap();
    assert_eq!(game.players[0].loan_balance.as_ref().unwrap().to_string(), "₦500,000");
    assert_eq!(backend.plays(), 0);
}

#[tokio::test]
async fn housing_without_tier_lists_choices() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = backend.app(dir.path().join("s.json"));

    let code = app.create_game().await.unwrap();
    app.join_game(&code, "Ada").await.unwrap();
    app.open_housing_modal();
    assert_eq!(app.state().current_screen, Screen::Game);
    assert!(app.render().await.contains("Choose your home"));

    app.pick_housing(HousingType::ParentHouse).await.unwrap();
    assert!(!app.state().show_housing_modal);
    assert!(!app.render().await.contains("Choose your home"));
}

#[tokio::test]
async fn history_lists_played_rounds() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let app = backend.app(dir.path().join("s.json"));

    let code = app.create_game().await.unwrap();
    app.join_game(&code, "Ada").await.unwrap();
    app.pick_housing(HousingType::SharedApartment).await.unwrap();
    let result = app.play_round(0).await.unwrap();
    let history = app.history().await.unwrap();
    assert_eq!(history.rounds.len(), 1);
    assert_eq!(history.rounds[0].round_number, result.round_number);
    assert_eq!(history.rounds[0].housing_type, Some(HousingType::SharedApartment));

    app.navigate(Screen::History);
    let screen = app.render().await;
    assert!(screen.contains("Ada's history"), "{screen}");
    assert!(screen.contains("Round 1 · dice 4"), "{screen}");
    assert!(screen.contains(&format!("Cash {}", naira(result.cash_balance_end))), "{screen}");
}

#[tokio::test]
async fn deleting_yourself_ends_the_session() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admin.json");
    let app = backend.admin_app(path.clone());

    let code = app.create_game().await.unwrap();
    let me = app.join_game(&code, "Ada").await.unwrap();
    app.delete_player(&me.id).await.unwrap();

    let state = app.state();
    assert_eq!(state.game_code, None);
    assert_eq!(state.current_player_id, None);
    assert_eq!(state.current_screen, Screen::Landing);
    assert!(state.toasts.iter().any(|t| t.message.starts_with("Player ") && t.message.ends_with(" removed")));
    assert!(!path.exists());
    assert!(app.admin_players().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_someone_else_keeps_the_session() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let admin = backend.admin_app(dir.path().join("admin.json"));
    let guest = backend.app(dir.path().join("guest.json"));

    let code = admin.create_game().await.unwrap();
    admin.join_game(&code, "Ada").await.unwrap();
    let bo = guest.join_game(&code, "Bo").await.unwrap();
    assert_eq!(admin.game().await.unwrap().players.len(), 2);

    admin.delete_player(&bo.id).await.unwrap();
    assert_eq!(admin.state().game_code.as_deref(), Some(code.as_str()));
    let game = admin.game().await.unwrap();
    assert_eq!(game.players.len(), 1);
    assert_eq!(game.players[0].name, "Ada");
}

#[tokio::test]
async fn bulk_deletes_skip_failures() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let admin = backend.admin_app(dir.path().join("admin.json"));
    let guest = backend.app(dir.path().join("guest.json"));

    let kept = admin.create_game().await.unwrap();
    let ada = admin.join_game(&kept, "Ada").await.unwrap();
    let other = guest.create_game().await.unwrap();
    guest.join_game(&other, "Bo").await.unwrap();
    backend.refuse_delete(ada.id.as_str());

    let deleted = admin.delete_all_players_everywhere().await.unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(backend.player_count(), 1);
    let last = admin.state().toasts.iter().last().cloned().unwrap();
    assert_eq!(last.message, "Attempted to clear all players");
    assert_eq!(last.kind, ToastKind::Info);

    backend.refuse_delete(&kept);
    let deleted = admin.delete_all_games().await.unwrap();
    assert_eq!(deleted, 1);
    let left = admin.admin_games().await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].game_code, kept);
    let last = admin.state().toasts.iter().last().cloned().unwrap();
    assert_eq!(last.message, "Attempted to clear all games");
    assert_eq!(last.kind, ToastKind::Info);
}

#[tokio::test]
async fn admin_clears_lobby_and_ends_game() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let admin = backend.admin_app(dir.path().join("admin.json"));
    let guest = backend.app(dir.path().join("guest.json"));

    let code = admin.create_game().await.unwrap();
    guest.join_game(&code, "Bo").await.unwrap();
    assert_eq!(admin.game().await.unwrap().players.len(), 1);

    admin.delete_all_players().await.unwrap();
    assert!(admin.game().await.unwrap().players.is_empty());

    admin.force_end_game(&code).await.unwrap();
    assert_eq!(admin.game().await.unwrap().status, GameStatus::Finished);
    let messages: Vec<_> = admin.state().toasts.iter().map(|t| t.message.clone()).collect();
    assert!(messages.contains(&"All players removed from lobby".to_string()));
    assert!(messages.contains(&format!("Game {code} ended")));
}
