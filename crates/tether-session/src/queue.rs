//! Outbound message queue
//!
//! Commands issued while the connection is not yet open are neither dropped
//! nor reordered: producers append here, and the connection task drains in
//! insertion order once the socket is open.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tether_protocol::OutgoingAction;

/// Backlog size at which we start warning. Nothing is ever dropped; the
/// warning makes a stalled connection visible in logs.
const BACKLOG_WARN_THRESHOLD: usize = 100;

/// FIFO queue of pending outbound actions.
#[derive(Default)]
pub struct OutboundQueue {
    inner: Mutex<VecDeque<OutgoingAction>>,
}

impl OutboundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action to the backlog.
    pub fn enqueue(&self, action: OutgoingAction) {
        let mut queue = self.inner.lock();
        queue.push_back(action);
        if queue.len() == BACKLOG_WARN_THRESHOLD {
            tracing::warn!(
                "outbound backlog reached {} messages while disconnected",
                BACKLOG_WARN_THRESHOLD
            );
        }
    }

    /// Drain the entire backlog in insertion order. No-op (empty vec) when
    /// there is nothing pending.
    pub fn drain(&self) -> Vec<OutgoingAction> {
        self.inner.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
