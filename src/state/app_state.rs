//! Shared application state for the HTTP layer

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{error, info};

use super::{SchedulerState, TimerSettings};
use crate::{
    error::{SessionError, SettingsError},
    scheduler::SessionCommand,
    services::{sync_login_item, LoginItemRegistrar, SettingsStore},
    tasks::SessionHandle,
};

/// Everything the request handlers need: the session worker, the
/// collaborators and some server metadata
pub struct AppState {
    pub session: SessionHandle,
    pub settings_store: Arc<dyn SettingsStore>,
    pub login_items: Arc<dyn LoginItemRegistrar>,
    /// Settings as last loaded or saved
    settings: Mutex<TimerSettings>,
    /// Held across a whole settings apply so store, cache and worker agree
    settings_apply: AsyncMutex<()>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        session: SessionHandle,
        settings_store: Arc<dyn SettingsStore>,
        login_items: Arc<dyn LoginItemRegistrar>,
        settings: TimerSettings,
    ) -> Self {
        Self {
            session,
            settings_store,
            login_items,
            settings: Mutex::new(settings),
            settings_apply: AsyncMutex::new(()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Send a command to the session worker and record it as the last action
    pub async fn execute(&self, command: SessionCommand) -> Result<SchedulerState, SessionError> {
        let state = self.session.execute(command).await?;
        self.record_action(command.name());
        Ok(state)
    }

    pub fn settings(&self) -> TimerSettings {
        match self.settings.lock() {
            Ok(settings) => *settings,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Persist new settings, hand them to the scheduler and sync the login item
    pub async fn apply_settings(&self, settings: TimerSettings) -> Result<SchedulerState, SettingsError> {
        let _guard = self.settings_apply.lock().await;
        self.settings_store.save(&settings)?;
        match self.settings.lock() {
            Ok(mut current) => *current = settings,
            Err(poisoned) => *poisoned.into_inner() = settings,
        }
        sync_login_item(self.login_items.as_ref(), settings.start_at_login);

        info!(
            work = settings.work_minutes,
            brk = settings.break_minutes,
            "Applying new settings"
        );
        match self.execute(SessionCommand::UpdateSettings { settings }).await {
            Ok(state) => Ok(state),
            Err(e) => {
                // Saved but the worker is gone; next launch picks them up
                error!("Failed to hand settings to session: {}", e);
                Ok(self.session.state())
            }
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last) = self.last_action.lock() {
            *last = Some((action.to_string(), Utc::now()));
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock() {
            Ok(last) => match last.as_ref() {
                Some((action, at)) => (Some(action.clone()), Some(*at)),
                None => (None, None),
            },
            Err(_) => (None, None),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
