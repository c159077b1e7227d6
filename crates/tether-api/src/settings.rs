//! Settings resource client
//!
//! Reads and writes the agent configuration document; the socket `init`
//! handshake payload is derived from this resource.

use tether_protocol::AgentSettings;

use crate::error::{Result, check};

/// Client for the settings REST resource.
pub struct SettingsClient {
    client: reqwest::Client,
    base_url: String,
}

impl SettingsClient {
    /// Create a new settings client against an HTTP base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the current settings document.
    pub async fn get(&self) -> Result<AgentSettings> {
        let url = format!("{}/api/settings", self.base_url);
        tracing::debug!("fetching settings from {}", url);
        let response = check(self.client.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Persist a settings document.
    pub async fn save(&self, settings: &AgentSettings) -> Result<()> {
        let url = format!("{}/api/settings", self.base_url);
        check(self.client.post(&url).json(settings).send().await?).await?;
        Ok(())
    }
}
