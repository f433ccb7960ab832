//! Local client state and its persistence boundary.

pub mod session;
pub mod store;

pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, PERSIST_KEY};
pub use store::{Action, GameState, Store};
