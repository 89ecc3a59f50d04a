//! Owner identity extraction.
//!
//! Authentication happens upstream; the gateway forwards the verified user
//! id in a configurable header. Requests without it are rejected with 401.

use super::error::ApiError;
use super::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use counsel_domain::OwnerId;

/// The authenticated owner of the request.
#[derive(Debug, Clone)]
pub struct Identity(pub OwnerId);

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(&state.user_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Identity(OwnerId::new(id)))
            .ok_or(ApiError::Unauthorized)
    }
}
