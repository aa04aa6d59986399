//! Collaborator boundaries
//!
//! Settings persistence and login item registration. The timer core never
//! depends on these directly; the binary and the HTTP layer wire them in.

pub mod login_item;
pub mod settings_store;

// Re-export main types
pub use login_item::{sync_login_item, LoggingRegistrar, LoginItemRegistrar};
pub use settings_store::{JsonFileStore, SettingsStore};
