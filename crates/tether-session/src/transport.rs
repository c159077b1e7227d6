//! Transport abstraction over the backend socket
//!
//! The connection manager only sees these traits; production wires in
//! [`WsTransport`], tests wire in channel-backed mocks.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use crate::error::{Error, Result};

/// Factory for socket connections.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a new socket to `url`. Each call produces an independent
    /// channel; the caller enforces the at-most-one-live-socket invariant.
    async fn connect(&self, url: &Url) -> Result<Box<dyn Socket>>;
}

/// One live, bidirectional text-frame channel.
#[async_trait]
pub trait Socket: Send {
    /// Transmit one UTF-8 JSON text frame.
    async fn send(&mut self, text: String) -> Result<()>;

    /// Receive the next text frame. `None` means the peer closed the
    /// channel; `Some(Err(_))` is a transport fault (the channel is dead
    /// after one).
    async fn recv(&mut self) -> Option<Result<String>>;

    /// Close the channel. Best-effort; errors are swallowed.
    async fn close(&mut self);
}

/// WebSocket transport over tokio-tungstenite.
pub struct WsTransport;

#[async_trait]
impl Transport for WsTransport {
    async fn connect(&self, url: &Url) -> Result<Box<dyn Socket>> {
        let (stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Box::new(WsSocket { stream }))
    }
}

struct WsSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Socket for WsSocket {
    async fn send(&mut self, text: String) -> Result<()> {
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<String>> {
        // Skip control frames; tungstenite answers pings internally.
        while let Some(message) = self.stream.next().await {
            match message {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Close(_)) => return None,
                Ok(_) => continue,
                Err(e) => return Some(Err(Error::Transport(e.to_string()))),
            }
        }
        None
    }

    async fn close(&mut self) {
        let _ = self.stream.close(None).await;
    }
}
