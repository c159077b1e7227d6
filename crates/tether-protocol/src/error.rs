//! Error types for tether-protocol

use thiserror::Error;

/// Result type alias using tether-protocol FrameError
pub type Result<T> = std::result::Result<T, FrameError>;

/// Errors that can occur while decoding or encoding frames
#[derive(Error, Debug)]
pub enum FrameError {
    /// Frame was not valid JSON or did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Frame was valid JSON but not an object
    #[error("frame is not a JSON object")]
    NotAnObject,
}
