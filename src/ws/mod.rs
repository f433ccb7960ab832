//! Real-time update channel (STOMP over websocket).

pub mod connection;
pub mod event;
pub mod frame;
pub mod transport;

pub use connection::{topic_for, ChannelState, EventHandler, GameChannel};
pub use event::{GameEvent, GameEventType};
pub use transport::{Connector, Transport, WsConnector, WsTransport};
