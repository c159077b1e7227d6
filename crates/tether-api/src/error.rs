//! Error types for tether-api

use thiserror::Error;

/// Result type alias using tether-api Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when calling the REST collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    /// A repository full name did not parse as `owner/repo[/subpath]`
    #[error("invalid repository name: {0}")]
    InvalidRepoName(String),
}

impl Error {
    /// Whether the resource was missing rather than the call failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }

    /// Whether the backend rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api { status: 401, .. })
    }
}

/// Map a response to `Ok(response)` or a typed API error carrying the
/// status and response body.
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}
