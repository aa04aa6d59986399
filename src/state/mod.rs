//! State management module
//!
//! Phase and countdown state, the settings value, and the shared state the
//! HTTP layer works against.

pub mod app_state;
pub mod phase;
pub mod settings;

// Re-export main types
pub use app_state::AppState;
pub use phase::{Phase, SchedulerState};
pub use settings::TimerSettings;
