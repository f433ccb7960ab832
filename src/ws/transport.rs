//! Text transport seam under the STOMP session.

use std::future::Future;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

use crate::error::{ClientError, Result};

/// A bidirectional stream of text messages.
pub trait Transport: Send + 'static {
    fn send(&mut self, text: String) -> impl Future<Output = Result<()>> + Send;
    /// `None` once the peer has closed the connection.
    fn recv(&mut self) -> impl Future<Output = Option<Result<String>>> + Send;
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// Opens transports to a URL.
pub trait Connector: Send + Sync + 'static {
    type Transport: Transport;

    fn connect(&self, url: &str) -> impl Future<Output = Result<Self::Transport>> + Send;
}

fn channel_err(err: impl std::fmt::Display) -> ClientError {
    ClientError::Channel(err.to_string())
}

/// WebSocket transport (the raw-websocket flavour of a SockJS endpoint).
#[derive(Debug)]
pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Transport for WsTransport {
    async fn send(&mut self, text: String) -> Result<()> {
        self.stream.send(Message::Text(text)).await.map_err(channel_err)
    }

    async fn recv(&mut self) -> Option<Result<String>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Binary(bytes)) => {
                    return Some(String::from_utf8(bytes).map_err(channel_err));
                }
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "websocket closed by peer");
                    return None;
                }
                Ok(other) => trace!(?other, "control frame"),
                Err(err) => return Some(Err(channel_err(err))),
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self.stream.close(None).await {
            Ok(())
            | Err(tokio_tungstenite::tungstenite::Error::ConnectionClosed)
            | Err(tokio_tungstenite::tungstenite::Error::AlreadyClosed) => Ok(()),
            Err(err) => Err(channel_err(err)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

impl Connector for WsConnector {
    type Transport = WsTransport;

    async fn connect(&self, url: &str) -> Result<WsTransport> {
        let (stream, response) = connect_async(url).await.map_err(channel_err)?;
        debug!(%url, status = %response.status(), "websocket connected");
        Ok(WsTransport { stream })
    }
}
