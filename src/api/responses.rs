//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{Phase, SchedulerState, TimerSettings},
    utils::format::{available_actions, break_prompt_visible, display_for, postpone_options},
};

/// What the presentation layer needs to render the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub display: String,
    /// Status menu commands
    pub actions: Vec<String>,
    /// Whether the break prompt should be on screen
    pub break_prompt: bool,
    /// Postpone lengths in minutes; skip is offered whenever the prompt is up
    pub postpone_options: Vec<u32>,
}

impl From<SchedulerState> for SessionView {
    fn from(state: SchedulerState) -> Self {
        Self {
            phase: state.phase,
            remaining_seconds: state.remaining_seconds,
            display: display_for(state.phase, state.remaining_seconds),
            actions: available_actions(state.phase)
                .into_iter()
                .map(String::from)
                .collect(),
            break_prompt: break_prompt_visible(&state),
            postpone_options: postpone_options(state.phase),
        }
    }
}

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionView,
}

impl ApiResponse {
    pub fn new(message: impl Into<String>, state: SchedulerState) -> Self {
        Self {
            status: state.phase.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            session: state.into(),
        }
    }
}

/// Status response with session, settings and server details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionView,
    pub settings: TimerSettings,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Body of POST /break/postpone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostponeRequest {
    pub minutes: u32,
}

/// Body of PUT /settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsRequest {
    #[serde(flatten)]
    pub settings: TimerSettings,
    /// Start a fresh work phase with the new durations
    #[serde(default)]
    pub restart: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub settings: TimerSettings,
    pub session: SessionView,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
