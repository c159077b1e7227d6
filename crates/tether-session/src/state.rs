//! Session state: the containers a view layer renders from.
//!
//! This is the projection target of the dispatcher. It holds no network or
//! timing logic; every method is a pure state transition given one event.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tether_protocol::{AgentState, EventSource, IncomingFrame, SecurityRisk};
use uuid::Uuid;

/// Hard ceiling on rendered terminal output, in characters.
///
/// Output from `run` observations beyond this length is clipped with a
/// truncation marker; `run_ipython` output is intentionally exempt (the
/// observed reference behavior is asymmetric).
pub const TERMINAL_OUTPUT_LIMIT: usize = 5000;

/// One entry in the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub source: EventSource,
    pub content: String,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn new(source: EventSource, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            content: content.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// One entry in the terminal pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerminalEntry {
    Command { text: String },
    Output { text: String },
}

/// One entry in the notebook pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JupyterEntry {
    Code { text: String },
    Output { text: String },
}

/// Last-known browser view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserView {
    pub url: Option<String>,
    /// Screenshot as an opaque data URL
    pub screenshot: Option<String>,
}

/// Most recently read or edited file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileView {
    pub path: Option<String>,
    pub content: Option<String>,
}

/// A surfaced error with an optional de-duplication key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedError {
    /// Stable key; tracking a second error under the same key replaces the
    /// first rather than accumulating.
    pub key: Option<String>,
    pub message: String,
    /// Fixed tag naming the subsystem that reported the error
    pub source: String,
}

/// De-duplicated, keyed error list: exactly one visible entry per distinct
/// ongoing problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorTracker {
    entries: Vec<TrackedError>,
}

impl ErrorTracker {
    /// Record an error. Keyed errors replace any existing entry under the
    /// same key; unkeyed errors always append.
    pub fn track(&mut self, key: Option<&str>, message: impl Into<String>, source: &str) {
        let entry = TrackedError {
            key: key.map(str::to_string),
            message: message.into(),
            source: source.to_string(),
        };
        if let Some(key) = key {
            if let Some(existing) = self
                .entries
                .iter_mut()
                .find(|e| e.key.as_deref() == Some(key))
            {
                *existing = entry;
                return;
            }
        }
        self.entries.push(entry);
    }

    /// Clear the entry under `key`, if present. Used when the underlying
    /// problem recovers.
    pub fn resolve(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key.as_deref() != Some(key));
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[TrackedError] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Everything the view layer reads: transcript, panes, agent state, status
/// slot, errors, and the raw frame history.
#[derive(Debug, Default)]
pub struct SessionState {
    agent_state: Option<AgentState>,
    chat: Vec<ChatMessage>,
    terminal: Vec<TerminalEntry>,
    jupyter: Vec<JupyterEntry>,
    browser: BrowserView,
    file: FileView,
    /// Single overwriting status slot
    current_status: Option<String>,
    pub errors: ErrorTracker,
    /// Risk annotations keyed by action event id
    security_risks: HashMap<i64, SecurityRisk>,
    /// Append-only record of every classified stream frame, arrival order
    history: Vec<IncomingFrame>,
    /// Resume cursor: id of the last successfully processed event
    latest_event_id: Option<i64>,
}

impl SessionState {
    pub fn agent_state(&self) -> Option<AgentState> {
        self.agent_state
    }

    pub fn set_agent_state(&mut self, state: AgentState) {
        self.agent_state = Some(state);
    }

    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    pub fn push_chat(&mut self, source: EventSource, content: impl Into<String>) {
        self.chat.push(ChatMessage::new(source, content));
    }

    pub fn terminal(&self) -> &[TerminalEntry] {
        &self.terminal
    }

    pub fn push_terminal_command(&mut self, command: impl Into<String>) {
        self.terminal.push(TerminalEntry::Command {
            text: command.into(),
        });
    }

    /// Append terminal output, applying the truncation law.
    pub fn push_terminal_output(&mut self, output: &str) {
        self.terminal.push(TerminalEntry::Output {
            text: truncate_output(output, TERMINAL_OUTPUT_LIMIT),
        });
    }

    pub fn jupyter(&self) -> &[JupyterEntry] {
        &self.jupyter
    }

    pub fn push_jupyter_code(&mut self, code: impl Into<String>) {
        self.jupyter.push(JupyterEntry::Code { text: code.into() });
    }

    pub fn push_jupyter_output(&mut self, output: impl Into<String>) {
        self.jupyter.push(JupyterEntry::Output {
            text: output.into(),
        });
    }

    pub fn browser(&self) -> &BrowserView {
        &self.browser
    }

    pub fn update_browser(&mut self, url: Option<String>, screenshot: Option<String>) {
        if url.is_some() {
            self.browser.url = url;
        }
        if screenshot.is_some() {
            self.browser.screenshot = screenshot;
        }
    }

    pub fn file(&self) -> &FileView {
        &self.file
    }

    pub fn update_file(&mut self, path: Option<String>, content: Option<String>) {
        self.file = FileView { path, content };
    }

    pub fn current_status(&self) -> Option<&str> {
        self.current_status.as_deref()
    }

    /// Overwrite the single status slot; statuses never accumulate.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.current_status = Some(message.into());
    }

    pub fn security_risk(&self, action_id: i64) -> Option<SecurityRisk> {
        self.security_risks.get(&action_id).copied()
    }

    pub fn annotate_security_risk(&mut self, action_id: i64, risk: SecurityRisk) {
        self.security_risks.insert(action_id, risk);
    }

    pub fn history(&self) -> &[IncomingFrame] {
        &self.history
    }

    pub fn latest_event_id(&self) -> Option<i64> {
        self.latest_event_id
    }

    /// Record a stream frame in arrival order and advance the resume cursor.
    pub fn record(&mut self, frame: IncomingFrame) {
        if let Some(id) = frame.event_id() {
            self.latest_event_id = Some(id);
        }
        self.history.push(frame);
    }
}

/// Truncation law for terminal output.
///
/// Content at or below `ceiling` characters passes through unchanged; longer
/// content is clipped to the first `ceiling` characters followed by a marker
/// naming how many characters were dropped.
pub fn truncate_output(content: &str, ceiling: usize) -> String {
    let total = content.chars().count();
    if total <= ceiling {
        return content.to_string();
    }
    let head: String = content.chars().take(ceiling).collect();
    let dropped = total - ceiling;
    format!("{head}... (truncated {dropped} characters) ...")
}
