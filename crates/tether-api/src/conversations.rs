//! Conversation-search resource client

use serde::{Deserialize, Serialize};

use crate::error::{Result, check};

/// Runtime status of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationStatus {
    Running,
    Stopped,
    Starting,
    #[serde(other)]
    Unknown,
}

/// What started a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationTrigger {
    Gui,
    Resolver,
    Suggested,
    #[serde(other)]
    Unknown,
}

/// Summary row returned by conversation search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<ConversationStatus>,
    #[serde(default)]
    pub selected_repository: Option<String>,
    #[serde(default)]
    pub selected_branch: Option<String>,
    #[serde(default)]
    pub trigger: Option<ConversationTrigger>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub last_updated_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub pr_number: Vec<u64>,
}

/// Search parameters. Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default)]
pub struct ConversationQuery {
    /// Restrict to conversations on this repository full name
    pub repository: Option<String>,
    /// Restrict to conversations started by this trigger
    pub trigger: Option<ConversationTrigger>,
    /// Maximum number of summaries to return
    pub limit: Option<usize>,
}

/// Client for the conversation-search REST resource.
pub struct ConversationsClient {
    client: reqwest::Client,
    base_url: String,
}

impl ConversationsClient {
    /// Create a new conversation-search client against an HTTP base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Search conversation summaries.
    pub async fn search(&self, query: &ConversationQuery) -> Result<Vec<ConversationSummary>> {
        let url = format!("{}/api/conversations", self.base_url);
        tracing::debug!("searching conversations at {}", url);
        let mut request = self.client.get(&url);
        if let Some(repository) = &query.repository {
            request = request.query(&[("selected_repository", repository.as_str())]);
        }
        if let Some(trigger) = query.trigger {
            request = request.query(&[("conversation_trigger", serde_variant(trigger)?)]);
        }
        if let Some(limit) = query.limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Render an enum's serde tag as a plain query-string value.
fn serde_variant(trigger: ConversationTrigger) -> Result<String> {
    let value = serde_json::to_value(trigger)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}
