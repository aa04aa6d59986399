//! Break scheduling core
//!
//! The countdown mechanism ([`BreakScheduler`]), the phase transition policy
//! ([`SessionOrchestrator`]) and the tick sources they run against.

pub mod break_scheduler;
pub mod clock;
pub mod notification;
pub mod orchestrator;

pub use break_scheduler::BreakScheduler;
pub use clock::{Clock, IntervalClock, ManualClock};
pub use notification::{Notification, TickOutcome};
pub use orchestrator::{SessionCommand, SessionOrchestrator};
