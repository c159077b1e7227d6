//! tether-session: the client pipeline to an agent backend
//!
//! This crate owns the persistent socket to the agent backend and everything
//! between it and a view layer: connection lifecycle with fixed-delay
//! reconnect, token acquisition and rotation, an outbound FIFO queue, frame
//! dispatch, and the projection of protocol events onto renderable session
//! state.

pub mod auth;
pub mod config;
pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod notify;
pub mod queue;
pub mod state;
pub mod transport;

pub use auth::{StaticTokenProvider, TokenProvider, TokenStore};
pub use config::SessionConfig;
pub use connection::{ConnectionManager, ConnectionStatus};
pub use dispatcher::Dispatcher;
pub use error::Error;
pub use events::SessionEvent;
pub use notify::{NoopNotifier, NotificationKind, Notifier};
pub use queue::OutboundQueue;
pub use state::{SessionState, TERMINAL_OUTPUT_LIMIT};
pub use transport::{Socket, Transport, WsTransport};
