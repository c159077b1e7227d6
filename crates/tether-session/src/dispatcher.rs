//! Frame dispatch: classify each inbound frame and route it to exactly one
//! handler family, projecting its effects onto [`SessionState`].

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use tether_protocol::{
    ActionFrame, ActionKind, ConfirmationState, EventSource, IncomingFrame, ObservationFrame,
    ObservationKind, StatusFrame, StatusKind,
};

use crate::auth::TokenStore;
use crate::events::SessionEvent;
use crate::notify::{NotificationKind, Notifier};
use crate::state::SessionState;

/// De-duplication key for socket-level errors.
pub const WS_ERROR_KEY: &str = "ws";

/// De-duplication key for token-acquisition errors.
pub const AUTH_ERROR_KEY: &str = "auth";

/// Source tag attached to errors the pipeline itself reports.
pub(crate) const SESSION_ERROR_SOURCE: &str = "session";

/// Source tag for errors the agent reported as observations.
const AGENT_ERROR_SOURCE: &str = "agent";

/// Source tag for error-typed status frames.
const STATUS_ERROR_SOURCE: &str = "status";

/// Routes classified frames into session state and the event bus.
///
/// The dispatcher is the only writer of [`SessionState`]; view code holds
/// read access through the shared lock.
pub struct Dispatcher {
    state: Arc<RwLock<SessionState>>,
    tokens: Arc<TokenStore>,
    events: broadcast::Sender<SessionEvent>,
    notifier: Arc<dyn Notifier>,
    notifications: bool,
}

impl Dispatcher {
    pub fn new(
        state: Arc<RwLock<SessionState>>,
        tokens: Arc<TokenStore>,
        events: broadcast::Sender<SessionEvent>,
        notifier: Arc<dyn Notifier>,
        notifications: bool,
    ) -> Self {
        Self {
            state,
            tokens,
            events,
            notifier,
            notifications,
        }
    }

    /// Parse and dispatch one raw text frame. Malformed frames are logged
    /// and dropped; they never crash the dispatcher or the socket.
    pub fn dispatch_text(&self, raw: &str) {
        match IncomingFrame::parse(raw) {
            Ok(frame) => self.dispatch(frame),
            Err(e) => tracing::warn!("dropping malformed frame: {}", e),
        }
    }

    /// Dispatch one classified frame to exactly one handler family.
    pub fn dispatch(&self, frame: IncomingFrame) {
        match frame {
            // Token rotation is credential plumbing: update the store and
            // stop. It is not part of the conversation history.
            IncomingFrame::Token(token) => {
                self.tokens.set(token.token);
                self.emit(SessionEvent::TokenRefreshed);
            }
            frame => {
                self.state.write().record(frame.clone());
                match frame {
                    IncomingFrame::Action(action) => self.handle_action(action),
                    IncomingFrame::Status(status) => self.handle_status(status),
                    IncomingFrame::Observation(observation) => {
                        self.handle_observation(observation)
                    }
                    IncomingFrame::Token(_) => unreachable!("token frames handled above"),
                }
            }
        }
    }

    /// Record an error into the tracker. Used by the connection manager for
    /// the sticky socket/auth errors as well as by the handlers below.
    pub fn track_error(&self, key: Option<&str>, message: impl Into<String>, source: &str) {
        let message = message.into();
        self.state.write().errors.track(key, &message, source);
        self.emit(SessionEvent::ErrorTracked {
            key: key.map(str::to_string),
            message,
        });
    }

    /// Clear the tracked error under `key` once the problem recovers.
    pub fn resolve_error(&self, key: &str) {
        self.state.write().errors.resolve(key);
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    fn handle_action(&self, frame: ActionFrame) {
        // Risk annotation is cross-cutting: it applies even to hidden actions.
        if let (Some(id), Some(risk)) = (frame.id, frame.args.security_risk) {
            self.state.write().annotate_security_risk(id, risk);
        }

        if frame.args.hidden {
            return;
        }

        // An action pending confirmation renders a preview instead of its
        // normal effect.
        if frame.args.confirmation_state == Some(ConfirmationState::AwaitingConfirmation) {
            self.push_confirmation_preview(&frame);
            return;
        }

        match frame.action {
            ActionKind::Message => {
                let content = frame
                    .args
                    .content
                    .clone()
                    .or_else(|| frame.message.clone());
                if let Some(content) = content {
                    let source = frame.source.unwrap_or(EventSource::Agent);
                    self.state.write().push_chat(source, content);
                    self.emit(SessionEvent::ChatUpdated);
                }
            }
            ActionKind::Run => {
                self.push_thought(&frame);
                if let Some(command) = &frame.args.command {
                    self.state.write().push_terminal_command(command);
                    self.emit(SessionEvent::TerminalUpdated);
                }
            }
            ActionKind::RunIpython => {
                self.push_thought(&frame);
                if let Some(code) = &frame.args.code {
                    self.state.write().push_jupyter_code(code);
                    self.emit(SessionEvent::JupyterUpdated);
                }
            }
            ActionKind::Think => {
                self.push_thought(&frame);
            }
            ActionKind::Finish | ActionKind::Reject => {
                let content = frame
                    .args
                    .thought
                    .clone()
                    .or_else(|| frame.message.clone());
                if let Some(content) = content {
                    self.state.write().push_chat(EventSource::Agent, content);
                    self.emit(SessionEvent::ChatUpdated);
                }
            }
            ActionKind::Read
            | ActionKind::Write
            | ActionKind::Edit
            | ActionKind::Browse
            | ActionKind::BrowseInteractive => {
                // The pane updates arrive with the matching observation.
                self.push_thought(&frame);
            }
            ActionKind::Init
            | ActionKind::Delegate
            | ActionKind::ChangeAgentState
            | ActionKind::Recall
            | ActionKind::Unknown => {
                tracing::debug!("no UI effect for action {:?}", frame.action);
            }
        }
    }

    /// Push the agent's accompanying thought into the chat transcript.
    fn push_thought(&self, frame: &ActionFrame) {
        if let Some(thought) = &frame.args.thought {
            if !thought.is_empty() {
                self.state.write().push_chat(EventSource::Agent, thought);
                self.emit(SessionEvent::ChatUpdated);
            }
        }
    }

    /// Preview for an action awaiting confirmation: the pending command or
    /// code plus its assessed risk level.
    fn push_confirmation_preview(&self, frame: &ActionFrame) {
        let payload = frame
            .args
            .payload()
            .or(frame.message.as_deref())
            .unwrap_or_default();
        let risk = frame
            .args
            .security_risk
            .unwrap_or(tether_protocol::SecurityRisk::Unknown);
        let preview = format!("{}\n\n{}", payload, risk.label());
        self.state.write().push_chat(EventSource::Agent, preview);
        self.emit(SessionEvent::ChatUpdated);
    }

    fn handle_observation(&self, frame: ObservationFrame) {
        match frame.observation {
            ObservationKind::Run => {
                self.state.write().push_terminal_output(&frame.content);
                self.emit(SessionEvent::TerminalUpdated);
            }
            ObservationKind::RunIpython => {
                // Notebook output is not truncated; see TERMINAL_OUTPUT_LIMIT.
                self.state.write().push_jupyter_output(frame.content);
                self.emit(SessionEvent::JupyterUpdated);
            }
            ObservationKind::Read | ObservationKind::Edit => {
                self.state
                    .write()
                    .update_file(frame.extras.path.clone(), Some(frame.content));
                self.emit(SessionEvent::FileUpdated);
            }
            ObservationKind::Browse => {
                self.state
                    .write()
                    .update_browser(frame.extras.url.clone(), frame.extras.screenshot.clone());
                self.emit(SessionEvent::BrowserUpdated);
            }
            ObservationKind::AgentStateChanged => {
                let Some(state) = frame.extras.agent_state else {
                    tracing::warn!("agent_state_changed observation without a state");
                    return;
                };
                self.state.write().set_agent_state(state);
                self.emit(SessionEvent::AgentStateChanged { state });
                if self.notifications {
                    if let Some(kind) = NotificationKind::for_state(state) {
                        self.notifier.notify(kind);
                    }
                }
            }
            ObservationKind::Error => {
                let message = if frame.content.is_empty() {
                    frame.message.clone().unwrap_or_else(|| "unknown error".to_string())
                } else {
                    frame.content.clone()
                };
                self.track_error(frame.extras.error_id.as_deref(), message, AGENT_ERROR_SOURCE);
            }
            ObservationKind::Delegate | ObservationKind::Recall | ObservationKind::Unknown => {
                tracing::debug!("no UI effect for observation {:?}", frame.observation);
            }
        }
    }

    fn handle_status(&self, frame: StatusFrame) {
        // A title update for a specific conversation invalidates that
        // conversation's metadata only; it never raises a banner.
        if let (Some(conversation_id), Some(title)) =
            (frame.conversation_id.clone(), frame.conversation_title.clone())
        {
            self.emit(SessionEvent::ConversationTitleChanged {
                conversation_id,
                title,
            });
            return;
        }

        match frame.kind {
            StatusKind::Info => {
                if let Some(message) = frame.message {
                    self.state.write().set_status(&message);
                    self.emit(SessionEvent::StatusUpdate { message });
                }
            }
            StatusKind::Error => {
                let message = frame.message.unwrap_or_else(|| "unknown error".to_string());
                self.track_error(frame.id.as_deref(), message, STATUS_ERROR_SOURCE);
            }
        }
    }
}
