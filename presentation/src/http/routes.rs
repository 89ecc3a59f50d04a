//! Router assembly.

use super::handlers;
use super::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the HTTP API router.
///
/// Every route except `/health` requires the identity header.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/sessions",
            get(handlers::list_sessions).post(handlers::create_session),
        )
        .route(
            "/api/sessions/:id",
            get(handlers::get_session)
                .patch(handlers::rename_session)
                .delete(handlers::delete_session),
        )
        .route(
            "/api/sessions/:id/messages",
            get(handlers::list_messages).post(handlers::submit_turn),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
