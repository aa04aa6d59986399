//! BreakTime - a work/break interval timer
//!
//! The core is a break-scheduling state machine that counts down work and
//! break phases, reacts to pause, resume, postpone and skip commands, and
//! emits notifications that drive presentation. The binary wraps it in a
//! local HTTP service.

pub mod api;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{SessionError, SettingsError};
pub use scheduler::{BreakScheduler, Notification, SessionCommand, SessionOrchestrator};
pub use state::{AppState, Phase, SchedulerState, TimerSettings};
pub use tasks::SessionHandle;
pub use utils::signals::shutdown_signal;
