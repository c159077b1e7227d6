//! Error types for tether-session

use thiserror::Error;

/// Result type alias using tether-session Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the session pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// No auth token could be acquired within the retry budget
    #[error("authentication failed: {0}")]
    Auth(String),

    /// `send` was called while the connection is fully down and not
    /// attempting to reconnect
    #[error("not connected")]
    NotConnected,

    /// Socket-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The init handshake could not be delivered
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// Invalid session configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A frame could not be encoded or decoded
    #[error(transparent)]
    Frame(#[from] tether_protocol::FrameError),

    /// JSON serialization failed outside the frame layer
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error indicates the backend rejected our credentials,
    /// in which case the cached token must be discarded before the next
    /// connect attempt.
    pub fn is_auth_rejection(&self) -> bool {
        match self {
            Error::Auth(_) => true,
            Error::Transport(msg) | Error::Handshake(msg) => {
                msg.contains("401") || msg.to_lowercase().contains("unauthorized")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_rejection_on_401_transport() {
        assert!(Error::Transport("HTTP error: 401 Unauthorized".into()).is_auth_rejection());
        assert!(Error::Transport("server rejected: unauthorized".into()).is_auth_rejection());
        assert!(!Error::Transport("connection refused".into()).is_auth_rejection());
    }

    #[test]
    fn test_auth_variant_is_rejection() {
        assert!(Error::Auth("no token".into()).is_auth_rejection());
        assert!(!Error::NotConnected.is_auth_rejection());
    }
}
