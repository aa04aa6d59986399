//! Phase and scheduler state structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current mode of the break scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Working,
    Breaking,
    Paused,
    Stopped,
}

impl Phase {
    /// Working and Breaking are the only phases that count down
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Working | Phase::Breaking)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Working => "working",
            Phase::Breaking => "breaking",
            Phase::Paused => "paused",
            Phase::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the countdown owned by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerState {
    pub phase: Phase,
    pub remaining_seconds: u64,
    /// Only ever Working or Breaking; read when resuming from Paused
    pub last_active_phase: Phase,
}

impl SchedulerState {
    /// Initial state: stopped with nothing remaining
    pub fn new() -> Self {
        Self {
            phase: Phase::Stopped,
            remaining_seconds: 0,
            last_active_phase: Phase::Working,
        }
    }
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new()
    }
}
