//! Timer settings value

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Work and break durations plus the login-item preference.
///
/// The serialized field names are the persisted payload shape and must not
/// change between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(rename = "workDurationMinutes")]
    pub work_minutes: u32,
    #[serde(rename = "breakDurationMinutes")]
    pub break_minutes: u32,
    #[serde(rename = "startAtLogin")]
    pub start_at_login: bool,
}

impl TimerSettings {
    pub fn new(work_minutes: u32, break_minutes: u32, start_at_login: bool) -> Self {
        Self {
            work_minutes,
            break_minutes,
            start_at_login,
        }
    }

    /// Both durations must be at least one minute
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.work_minutes == 0 {
            return Err(SettingsError::Invalid(
                "work duration must be at least 1 minute".to_string(),
            ));
        }
        if self.break_minutes == 0 {
            return Err(SettingsError::Invalid(
                "break duration must be at least 1 minute".to_string(),
            ));
        }
        Ok(())
    }

    pub fn work_seconds(&self) -> u64 {
        u64::from(self.work_minutes) * 60
    }

    pub fn break_seconds(&self) -> u64 {
        u64::from(self.break_minutes) * 60
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self::new(25, 5, false)
    }
}
