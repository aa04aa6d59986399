//! Display helpers for countdowns

use crate::state::{Phase, SchedulerState};

/// Postpone lengths offered on the break prompt, in minutes
pub const POSTPONE_OPTIONS: [u32; 2] = [5, 10];

/// `MM:SS`, minutes padded to two digits and allowed to grow past 99
pub fn format_remaining(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Countdown text as shown in the status indicator
pub fn display_for(phase: Phase, remaining_seconds: u64) -> String {
    match phase {
        Phase::Stopped => "--:--".to_string(),
        Phase::Paused if remaining_seconds == 0 => "--:--".to_string(),
        _ => format_remaining(remaining_seconds),
    }
}

/// Commands the status menu offers in a phase.
///
/// Postpone and skip are not menu items; they belong to the break prompt.
pub fn available_actions(phase: Phase) -> Vec<&'static str> {
    match phase {
        Phase::Working | Phase::Breaking => vec!["pause", "stop"],
        Phase::Paused => vec!["resume", "stop"],
        Phase::Stopped => vec!["start_work"],
    }
}

/// Whether the full-screen break prompt should be visible.
///
/// Shown during a break. A break paused with time left keeps it up; a pause
/// with nothing remaining, work, and stopped all hide it.
pub fn break_prompt_visible(state: &SchedulerState) -> bool {
    match state.phase {
        Phase::Breaking => true,
        Phase::Paused => {
            state.last_active_phase == Phase::Breaking && state.remaining_seconds > 0
        }
        Phase::Working | Phase::Stopped => false,
    }
}

/// Postpone choices on the break prompt; only a running break can be postponed
pub fn postpone_options(phase: Phase) -> Vec<u32> {
    match phase {
        Phase::Breaking => POSTPONE_OPTIONS.to_vec(),
        _ => Vec::new(),
    }
}
