//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tether_protocol::AgentSettings;

/// Configuration for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Backend base URL (ws:// or wss://)
    pub server_url: String,
    /// Conversation to attach to
    pub conversation_id: String,
    /// Fire desktop notifications on awaiting-input / finished transitions
    pub notifications: bool,
    /// Extra token-fetch attempts before giving up (None = retry forever)
    pub token_retry_limit: Option<u32>,
    /// Delay before each reconnect attempt, in milliseconds
    pub reconnect_delay_ms: u64,
    /// Agent configuration sent in the init handshake
    pub settings: AgentSettings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server_url: "ws://127.0.0.1:3000".to_string(),
            conversation_id: String::new(),
            notifications: false,
            token_retry_limit: Some(3),
            reconnect_delay_ms: 3_000,
            settings: AgentSettings::default(),
        }
    }
}

impl SessionConfig {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tether")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for TETHER_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("TETHER_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Delay before each reconnect attempt.
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# tether configuration file
# Place at ~/.config/tether/config.toml (Linux/Mac)

# Backend base URL
server_url = "ws://127.0.0.1:3000"

# Conversation to attach to
conversation_id = ""

# Fire desktop notifications when the agent awaits input or finishes
notifications = false

# Extra token-fetch attempts before giving up (omit for retry-forever)
token_retry_limit = 3

# Delay before each reconnect attempt
reconnect_delay_ms = 3000

# Agent configuration sent in the init handshake
[settings]
# llm_model = "claude-sonnet-4-5"
# agent = "CodeActAgent"
language = "en"
confirmation_mode = false
"#
}
