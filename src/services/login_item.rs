//! Login item registration boundary

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Registers the application to start at login
pub trait LoginItemRegistrar: Send + Sync {
    fn is_registered(&self) -> Result<bool, String>;

    fn set_registered(&self, enabled: bool) -> Result<(), String>;
}

/// Records the preference in-process without touching the OS
#[derive(Debug, Default)]
pub struct LoggingRegistrar {
    registered: AtomicBool,
}

impl LoggingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoginItemRegistrar for LoggingRegistrar {
    fn is_registered(&self) -> Result<bool, String> {
        Ok(self.registered.load(Ordering::SeqCst))
    }

    fn set_registered(&self, enabled: bool) -> Result<(), String> {
        info!("Login item {}", if enabled { "registered" } else { "unregistered" });
        self.registered.store(enabled, Ordering::SeqCst);
        Ok(())
    }
}

/// Bring the login item in line with the start-at-login preference.
///
/// Only acts when the current registration differs. Failures are logged and
/// never propagated: the timer works the same either way.
pub fn sync_login_item(registrar: &dyn LoginItemRegistrar, desired: bool) {
    match registrar.is_registered() {
        Ok(registered) if registered == desired => {
            debug!(
                "Login item already {}, no action needed",
                if registered { "registered" } else { "unregistered" }
            );
        }
        Ok(_) => {
            if let Err(e) = registrar.set_registered(desired) {
                warn!("Could not update login item: {}", e);
            }
        }
        Err(e) => {
            warn!("Failed to check login item status: {}", e);
        }
    }
}
