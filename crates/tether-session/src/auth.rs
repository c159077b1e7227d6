//! Token acquisition and storage

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};

/// Delay between token-fetch attempts when the endpoint is transiently
/// unavailable (e.g. at boot).
const TOKEN_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Source of session tokens. Implementations wrap the auth endpoint of the
/// deployment (or return a fixed token for local backends that skip auth).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Fetch a fresh token. Transient failures are retried by the caller.
    async fn fetch_token(&self) -> Result<String>;
}

/// Provider returning a fixed token, for backends without a token endpoint
/// and for tests.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn fetch_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Shared cell holding the current session token.
///
/// Written by the provider on connect and by token-rotation frames; cleared
/// when the backend rejects our credentials.
#[derive(Default)]
pub struct TokenStore {
    current: Mutex<Option<String>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.current.lock().clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.current.lock() = Some(token.into());
    }

    /// Discard the cached token, forcing a fresh fetch on the next connect.
    pub fn invalidate(&self) {
        *self.current.lock() = None;
    }
}

/// Return the cached token or fetch a fresh one, retrying transient
/// failures up to `retry_limit` extra attempts (`None` = retry forever).
pub(crate) async fn acquire_token(
    provider: &Arc<dyn TokenProvider>,
    store: &TokenStore,
    retry_limit: Option<u32>,
) -> Result<String> {
    if let Some(token) = store.get() {
        return Ok(token);
    }

    let mut attempt = 0u32;
    loop {
        match provider.fetch_token().await {
            Ok(token) => {
                store.set(token.clone());
                return Ok(token);
            }
            Err(e) => {
                if let Some(limit) = retry_limit {
                    if attempt >= limit {
                        return Err(Error::Auth(e.to_string()));
                    }
                }
                attempt += 1;
                tracing::warn!("token fetch failed (attempt {}): {}", attempt, e);
                tokio::time::sleep(TOKEN_RETRY_DELAY).await;
            }
        }
    }
}
