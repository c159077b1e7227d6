//! Core types shared across the event protocol

use serde::{Deserialize, Serialize};

/// Coarse lifecycle phase of the remote agent, mirrored client-side.
///
/// Updated only by `agent_state_changed` observations; drives which top-level
/// view the embedder shows and which transitions fire notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Loading,
    Init,
    Running,
    AwaitingUserInput,
    Paused,
    Stopped,
    Finished,
    AwaitingUserConfirmation,
    UserConfirmed,
    UserRejected,
    RateLimited,
    Error,
}

impl AgentState {
    /// Whether the agent has reached a state it will not leave on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AgentState::Finished | AgentState::Stopped | AgentState::Error
        )
    }

    /// Whether this state means the agent is waiting on the user.
    pub fn awaits_user(&self) -> bool {
        matches!(
            self,
            AgentState::AwaitingUserInput | AgentState::AwaitingUserConfirmation
        )
    }
}

/// Who produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    User,
    Agent,
    Environment,
}

/// Assessed risk level attached to an action by the security analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityRisk {
    Low,
    Medium,
    High,
    Unknown,
}

impl SecurityRisk {
    /// Human-readable label for confirmation previews.
    pub fn label(&self) -> &'static str {
        match self {
            SecurityRisk::Low => "Low Risk",
            SecurityRisk::Medium => "Medium Risk",
            SecurityRisk::High => "High Risk",
            SecurityRisk::Unknown => "Unknown Risk",
        }
    }
}

/// Confirmation-mode sub-state of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationState {
    AwaitingConfirmation,
    Confirmed,
    Rejected,
}

/// Action type tags the backend emits.
///
/// Unrecognized tags decode to `Unknown` so a newer backend never crashes the
/// dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Init,
    Message,
    Run,
    RunIpython,
    Read,
    Write,
    Edit,
    Browse,
    BrowseInteractive,
    Think,
    Finish,
    Reject,
    Delegate,
    ChangeAgentState,
    Recall,
    #[serde(other)]
    Unknown,
}

/// Observation type tags the backend emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    Run,
    RunIpython,
    Read,
    Edit,
    Browse,
    Error,
    AgentStateChanged,
    Delegate,
    Recall,
    #[serde(other)]
    Unknown,
}

/// Argument payload of an action frame.
///
/// The wire protocol uses one args bag for every action kind; fields not
/// relevant to a kind are simply absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionArgs {
    /// Shell command (`run`)
    pub command: Option<String>,
    /// Python code (`run_ipython`)
    pub code: Option<String>,
    /// Message or file content (`message`, `write`)
    pub content: Option<String>,
    /// Target URL (`browse`, `browse_interactive`)
    pub url: Option<String>,
    /// Target path (`read`, `write`, `edit`)
    pub path: Option<String>,
    /// Agent reasoning accompanying the action
    pub thought: Option<String>,
    /// Suppress all rendering of this action
    pub hidden: bool,
    /// Confirmation-mode sub-state
    pub confirmation_state: Option<ConfirmationState>,
    /// Risk level assessed by the security analyzer
    pub security_risk: Option<SecurityRisk>,
    /// Attached image data URLs (`message`)
    pub image_urls: Vec<String>,
}

impl ActionArgs {
    /// The command or code an action proposes to execute, if any.
    pub fn payload(&self) -> Option<&str> {
        self.command.as_deref().or(self.code.as_deref())
    }
}

/// Extra payload of an observation frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationExtras {
    /// Command that produced this output (`run`)
    pub command: Option<String>,
    /// Exit code of the command (`run`)
    pub exit_code: Option<i64>,
    /// Page URL (`browse`)
    pub url: Option<String>,
    /// Page screenshot as a data URL (`browse`)
    pub screenshot: Option<String>,
    /// File path (`read`, `edit`)
    pub path: Option<String>,
    /// New agent state (`agent_state_changed`)
    pub agent_state: Option<AgentState>,
    /// Stable identifier for de-duplicating repeated errors (`error`)
    pub error_id: Option<String>,
}

/// Agent configuration sent in the `init` handshake and exchanged with the
/// settings resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Model identifier (e.g. "claude-sonnet-4-5")
    pub llm_model: Option<String>,
    /// Agent implementation name
    pub agent: Option<String>,
    /// UI language tag
    pub language: String,
    /// Require user confirmation before risky actions
    pub confirmation_mode: bool,
    /// Security analyzer to run actions through
    pub security_analyzer: Option<String>,
    /// Whether an LLM API key is configured server-side (presence flag only;
    /// the key itself never crosses this boundary)
    pub llm_api_key_set: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            llm_model: None,
            agent: None,
            language: "en".to_string(),
            confirmation_mode: false,
            security_analyzer: None,
            llm_api_key_set: false,
        }
    }
}
