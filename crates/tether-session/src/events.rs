//! Session event types

use serde::{Deserialize, Serialize};
use tether_protocol::AgentState;

/// Events emitted by the pipeline, one typed channel instead of stringly
/// named callbacks. Subscribe via [`crate::ConnectionManager::subscribe`];
/// dropping the receiver is the teardown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Socket opened, handshake sent, queue flushed
    Open,
    /// Socket closed; `will_reconnect` is false only for caller-initiated
    /// disconnects
    Closed { will_reconnect: bool },
    /// Agent lifecycle phase changed
    AgentStateChanged { state: AgentState },
    /// Chat transcript gained an entry
    ChatUpdated,
    /// Terminal pane gained an entry
    TerminalUpdated,
    /// Notebook pane gained an entry
    JupyterUpdated,
    /// Browser view changed (url and/or screenshot)
    BrowserUpdated,
    /// File view changed
    FileUpdated,
    /// The single status slot was overwritten
    StatusUpdate { message: String },
    /// A conversation's title changed; owners of conversation metadata
    /// should refetch that conversation only
    ConversationTitleChanged {
        conversation_id: String,
        title: String,
    },
    /// An error was recorded (new or replacing the entry under `key`)
    ErrorTracked {
        key: Option<String>,
        message: String,
    },
    /// Backend rotated the session token
    TokenRefreshed,
}
