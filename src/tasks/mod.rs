//! Background tasks module
//!
//! The session worker that owns the timer, and subscribers that run alongside it.

pub mod notification_log;
pub mod session_runner;

// Re-export main items
pub use notification_log::notification_log_task;
pub use session_runner::SessionHandle;
