//! Headless client for the Monopoly "Game of Life" backend.
//!
//! The crate keeps the player's session (persisted between runs), talks to
//! the REST API through a tag-invalidated query cache, follows a game's
//! real-time STOMP topic, and renders each screen as text.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod router;
pub mod state;
pub mod telemetry;
pub mod toast;
pub mod util;
pub mod views;
pub mod ws;

pub use app::App;
pub use config::Config;
pub use error::{ClientError, Result};
pub use router::Screen;
