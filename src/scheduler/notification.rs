//! Notifications emitted by the break scheduler

use serde::{Deserialize, Serialize};

use crate::state::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Fired whenever the phase changes
    StateChanged { phase: Phase, remaining_seconds: u64 },
    /// Fired on every clock tick while armed
    Tick { remaining_seconds: u64 },
    /// Fired when a tick finds nothing left; the phase is left unchanged
    Completed,
}

impl Notification {
    /// Event name used on the server-sent event stream
    pub fn event_name(&self) -> &'static str {
        match self {
            Notification::StateChanged { .. } => "state_changed",
            Notification::Tick { .. } => "tick",
            Notification::Completed => "completed",
        }
    }
}

/// Result of delivering one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock was disarmed; nothing happened
    Ignored,
    Ticked { remaining_seconds: u64 },
    Completed,
}
