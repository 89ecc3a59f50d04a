//! Shared handler state.

use axum::http::HeaderName;
use counsel_application::{SessionDirectory, SubmitTurnUseCase};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<SessionDirectory>,
    pub turns: Arc<SubmitTurnUseCase>,
    /// Header carrying the owner id
    pub user_header: HeaderName,
}

impl AppState {
    pub fn new(
        directory: Arc<SessionDirectory>,
        turns: Arc<SubmitTurnUseCase>,
        user_header: HeaderName,
    ) -> Self {
        Self {
            directory,
            turns,
            user_header,
        }
    }
}
