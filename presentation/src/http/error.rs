//! Mapping of application errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use counsel_application::ChatError;
use serde_json::json;
use tracing::error;

/// Error returned by every handler.
///
/// Rendered as `{"error": <kind>, "message": <text>}`.
#[derive(Debug)]
pub enum ApiError {
    Chat(ChatError),
    /// No usable identity header on the request.
    Unauthorized,
    /// Body could not be parsed.
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Chat(e) => match e {
                ChatError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                ChatError::NotFoundOrForbidden => StatusCode::NOT_FOUND,
                ChatError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                ChatError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
                ChatError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "unauthorized",
            ApiError::BadRequest(_) => "invalid_input",
            ApiError::Chat(e) => e.kind(),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Missing user identity".to_string(),
            ApiError::BadRequest(reason) => reason.clone(),
            // Storage details stay in the server log
            ApiError::Chat(ChatError::StoreUnavailable(_)) => "Internal storage error".to_string(),
            ApiError::Chat(e) => e.to_string(),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        ApiError::Chat(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self);
        }
        let body = Json(json!({
            "error": self.kind(),
            "message": self.message(),
        }));
        (status, body).into_response()
    }
}
