//! Desktop notification hook

use tether_protocol::AgentState;

/// Transitions that may notify the user out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    AwaitingUserInput,
    Finished,
}

impl NotificationKind {
    /// Map an agent-state transition to its notification, if it has one.
    pub fn for_state(state: AgentState) -> Option<Self> {
        match state {
            AgentState::AwaitingUserInput => Some(Self::AwaitingUserInput),
            AgentState::Finished => Some(Self::Finished),
            _ => None,
        }
    }
}

/// Embedder-provided notification sink. Only invoked when the user opted in
/// via [`crate::SessionConfig::notifications`]; permission handling is the
/// embedder's concern.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind);
}

/// Default sink that drops every notification.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _kind: NotificationKind) {}
}
