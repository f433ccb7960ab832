//! `monopoly` - play the Game of Life from a terminal.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use monopoly_client::model::{HousingType, PlayerId};
use monopoly_client::util::format::initial;
use monopoly_client::{telemetry, App, Config, Screen};

#[derive(Parser, Debug)]
#[command(name = "monopoly")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// REST base URL (overrides MONOPOLY_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// STOMP websocket URL (overrides MONOPOLY_WS_URL)
    #[arg(long, global = true)]
    ws_url: Option<String>,

    /// Where the session is kept between runs (overrides MONOPOLY_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// More log output on stderr (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new game and open its lobby
    Create,

    /// Join a game by code
    Join { code: String, name: String },

    /// Continue the saved game
    Resume,

    /// Start the current game
    Start,

    /// Choose housing: parent, shared, single or luxury (omit to list them)
    Housing { tier: Option<HousingType> },

    /// Roll the dice for this round
    Play {
        /// Naira to pay back on the loan this round
        #[arg(short, long, default_value = "0")]
        loan: i64,
    },

    /// See what a loan payment would do, without paying
    PreviewLoan { amount: i64 },

    /// Standings after a round (default: the selected round)
    Leaderboard { round: Option<u32> },

    /// Your round-by-round history
    History,

    /// Render the current screen
    Show,

    /// Follow the game live until Ctrl-C
    Watch,

    /// Leave the current game
    Leave,

    /// Leave and wipe the saved session
    Forget,

    /// Administrative actions (needs MONOPOLY_ADMIN_PASSWORD)
    Admin {
        #[arg(short, long)]
        password: String,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand, Debug)]
enum AdminAction {
    /// List every game
    Games,
    /// List every player
    Players,
    DeletePlayer { id: String },
    DeleteGame { code: String },
    ForceEnd { code: String },
    /// Remove every player from the current game's lobby
    ClearLobby,
    /// Start the current game regardless of player count
    Start,
    DeleteAllGames,
    DeleteAllPlayers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    telemetry::init(args.verbose);

    let mut config = Config::from_env();
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(url) = args.ws_url {
        config.ws_url = url;
    }
    if let Some(path) = args.session_file {
        config.session_file = path;
    }
    tracing::debug!(api_url = %config.api_url, ws_url = %config.ws_url, session_file = %config.session_file.display(), "starting");

    let app = App::new(config)?;
    let outcome = run(&app, args.command).await;
    // screen and toasts are shown even when the command failed
    println!("{}", app.render().await);
    app.shutdown().await;
    outcome
}

async fn run(app: &App, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Create => {
            app.create_game().await?;
        }
        Commands::Join { code, name } => {
            app.join_game(&code, &name).await?;
        }
        Commands::Resume => {
            app.resume().await?;
        }
        Commands::Start => app.start_game().await?,
        Commands::Housing { tier: Some(tier) } => app.pick_housing(tier).await?,
        Commands::Housing { tier: None } => app.open_housing_modal(),
        Commands::Play { loan } => {
            app.navigate(Screen::Game);
            app.play_round(loan).await?;
        }
        Commands::PreviewLoan { amount } => {
            app.open_loan_modal();
            app.preview_loan(amount).await?;
        }
        Commands::Leaderboard { round } => {
            app.navigate(Screen::Leaderboard);
            if let Some(round) = round {
                app.select_round(round);
            }
        }
        Commands::History => app.navigate(Screen::History),
        Commands::Show => {}
        Commands::Watch => watch(app).await,
        Commands::Leave => app.leave().await,
        Commands::Forget => app.forget().await,
        Commands::Admin { password, action } => {
            app.admin_login(&password)?;
            admin(app, action).await?;
        }
    }
    Ok(())
}

async fn watch(app: &App) {
    app.follow().await;
    println!("{}", app.render().await);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = app.next_event() => {
                let Some(event) = event else { break };
                tracing::debug!(event_type = ?event.event_type, "re-rendering");
                println!("{}", app.render().await);
            }
        }
    }
}

async fn admin(app: &App, action: AdminAction) -> anyhow::Result<()> {
    match action {
        AdminAction::Games => {
            for game in app.admin_games().await? {
                println!(
                    "{:<8} {:<12} {} player(s)",
                    game.game_code,
                    game.status.as_deref().unwrap_or("?"),
                    game.players.len()
                );
            }
        }
        AdminAction::Players => {
            for player in app.admin_players().await? {
                println!("[{}] {:<16} {}", initial(&player.name), player.name, player.id);
            }
        }
        AdminAction::DeletePlayer { id } => app.delete_player(&PlayerId(id)).await?,
        AdminAction::DeleteGame { code } => app.delete_game(&code).await?,
        AdminAction::ForceEnd { code } => app.force_end_game(&code).await?,
        AdminAction::ClearLobby => app.delete_all_players().await?,
        AdminAction::Start => app.start_game().await?,
        AdminAction::DeleteAllGames => {
            let deleted = app.delete_all_games().await?;
            println!("{deleted} game(s) deleted");
        }
        AdminAction::DeleteAllPlayers => {
            let deleted = app.delete_all_players_everywhere().await?;
            println!("{deleted} player(s) deleted");
        }
    }
    Ok(())
}
