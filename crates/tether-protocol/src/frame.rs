//! Frame classification and outbound actions
//!
//! Every inbound text frame is one JSON object carrying exactly one of the
//! marker fields `token`, `action`, or `status_update`; an object with none
//! of them is an observation. [`IncomingFrame::classify`] applies that rule
//! with a fixed precedence so a frame is never double-handled.

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};
use crate::types::{
    ActionArgs, ActionKind, AgentSettings, AgentState, EventSource, ObservationExtras,
    ObservationKind,
};

/// An action the agent performed or is requesting confirmation for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionFrame {
    /// Backend-assigned event sequence id
    pub id: Option<i64>,
    pub action: ActionKind,
    pub source: Option<EventSource>,
    /// Human-readable summary provided by the backend
    pub message: Option<String>,
    #[serde(default)]
    pub args: ActionArgs,
    pub timestamp: Option<String>,
}

/// The result of a prior action or an out-of-band state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationFrame {
    /// Backend-assigned event sequence id
    pub id: Option<i64>,
    pub observation: ObservationKind,
    pub source: Option<EventSource>,
    #[serde(default)]
    pub content: String,
    pub message: Option<String>,
    #[serde(default)]
    pub extras: ObservationExtras,
    /// Id of the action this observation answers
    pub cause: Option<i64>,
    pub timestamp: Option<String>,
}

/// Severity of a status frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    #[default]
    Info,
    Error,
}

/// An informational or error frame not tied to a specific action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusFrame {
    #[serde(rename = "type", default)]
    pub kind: StatusKind,
    /// Stable identifier, used as the de-duplication key for errors
    pub id: Option<String>,
    pub message: Option<String>,
    pub conversation_id: Option<String>,
    pub conversation_title: Option<String>,
}

/// Session token rotation pushed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenFrame {
    pub token: String,
}

/// A classified inbound frame.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum IncomingFrame {
    Token(TokenFrame),
    Action(ActionFrame),
    Status(StatusFrame),
    Observation(ObservationFrame),
}

impl IncomingFrame {
    /// Classify a decoded JSON object into exactly one frame kind.
    ///
    /// Precedence: `token` > `action` > `status_update` > observation.
    pub fn classify(value: serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or(FrameError::NotAnObject)?;

        if object.contains_key("token") {
            return Ok(IncomingFrame::Token(serde_json::from_value(value)?));
        }
        if object.contains_key("action") {
            return Ok(IncomingFrame::Action(serde_json::from_value(value)?));
        }
        if object.contains_key("status_update") {
            return Ok(IncomingFrame::Status(serde_json::from_value(value)?));
        }
        Ok(IncomingFrame::Observation(serde_json::from_value(value)?))
    }

    /// Parse and classify a raw text frame.
    pub fn parse(text: &str) -> Result<Self> {
        Self::classify(serde_json::from_str(text)?)
    }

    /// The backend-assigned sequence id, when the frame carries one.
    ///
    /// Token and status frames are out-of-band and never advance the resume
    /// cursor.
    pub fn event_id(&self) -> Option<i64> {
        match self {
            IncomingFrame::Action(frame) => frame.id,
            IncomingFrame::Observation(frame) => frame.id,
            IncomingFrame::Token(_) | IncomingFrame::Status(_) => None,
        }
    }
}

/// An action request the client sends to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OutgoingAction {
    /// Protocol handshake carrying the current agent configuration; sent
    /// first on every successful open.
    Init { args: AgentSettings },
    /// A user chat message.
    Message { args: MessageArgs },
    /// A user-issued shell command.
    Run { args: RunArgs },
    /// Drive the agent lifecycle (pause, resume, confirm, reject).
    ChangeAgentState { args: ChangeStateArgs },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageArgs {
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunArgs {
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStateArgs {
    pub agent_state: AgentState,
}

impl OutgoingAction {
    /// Create the init handshake action.
    pub fn init(settings: AgentSettings) -> Self {
        Self::Init { args: settings }
    }

    /// Create a user message action.
    pub fn message(content: impl Into<String>) -> Self {
        Self::Message {
            args: MessageArgs {
                content: content.into(),
                image_urls: vec![],
            },
        }
    }

    /// Create a shell command action.
    pub fn run(command: impl Into<String>) -> Self {
        Self::Run {
            args: RunArgs {
                command: command.into(),
            },
        }
    }

    /// Create an agent lifecycle transition request.
    pub fn change_state(state: AgentState) -> Self {
        Self::ChangeAgentState {
            args: ChangeStateArgs { agent_state: state },
        }
    }

    /// Serialize to a single JSON text frame.
    pub fn to_frame(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
