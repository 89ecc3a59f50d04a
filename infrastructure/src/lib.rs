//! Infrastructure layer for career-counsel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod clock;
pub mod config;
pub mod logging;
pub mod providers;
pub mod store;

// Re-export commonly used types
pub use clock::SystemClock;
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use logging::JsonlConversationLogger;
pub use providers::{ReplicatePredictionProvider, ReplicateSettings};
pub use store::SqliteConversationStore;
