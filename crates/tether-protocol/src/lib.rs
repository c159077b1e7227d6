//! tether-protocol: wire types for the agent event protocol
//!
//! This crate defines the typed boundary between the client pipeline and the
//! backend: inbound frames (actions, observations, status updates, token
//! rotations), outbound action requests, and the shared enums both sides of
//! the socket agree on.

pub mod error;
pub mod frame;
pub mod types;

pub use error::{FrameError, Result};
pub use frame::{
    ActionFrame, IncomingFrame, ObservationFrame, OutgoingAction, StatusFrame, StatusKind,
    TokenFrame,
};
pub use types::{
    ActionArgs, ActionKind, AgentSettings, AgentState, ConfirmationState, EventSource,
    ObservationExtras, ObservationKind, SecurityRisk,
};
