//! HTTP API
//!
//! JSON endpoints over the session directory and turn processor.

mod auth;
mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use auth::Identity;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
