//! Presentation layer for career-counsel
//!
//! This crate contains the CLI definition and the HTTP API.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{AppState, router};
