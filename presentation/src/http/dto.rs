//! Request bodies of the HTTP API.
//!
//! Responses serialize the domain entities directly (camelCase fields).

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameSessionRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitTurnRequest {
    pub content: String,
}
