//! Route handlers.

use super::auth::Identity;
use super::dto::{CreateSessionRequest, RenameSessionRequest, SubmitTurnRequest};
use super::error::ApiError;
use super::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use counsel_application::{SessionDetail, SubmitTurnInput, TurnOutcome};
use counsel_domain::{ChatMessage, ChatSession, SessionId};
use serde::de::DeserializeOwned;
use serde_json::json;

type ApiResult<T> = Result<T, ApiError>;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// An empty body means "all defaults"; anything else must parse.
fn optional_body<T: DeserializeOwned + Default>(payload: &[u8]) -> ApiResult<T> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(payload).map_err(|e| ApiError::BadRequest(e.to_string()))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    Identity(owner): Identity,
) -> ApiResult<Json<Vec<ChatSession>>> {
    Ok(Json(state.directory.list_sessions(&owner).await?))
}

pub async fn create_session(
    State(state): State<AppState>,
    Identity(owner): Identity,
    payload: Bytes,
) -> ApiResult<(StatusCode, Json<ChatSession>)> {
    let request = optional_body::<CreateSessionRequest>(&payload)?;
    let session = state
        .directory
        .create_session(&owner, request.title.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn get_session(
    State(state): State<AppState>,
    Identity(owner): Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionDetail>> {
    let detail = state
        .directory
        .get_session(&owner, &SessionId::new(id))
        .await?;
    Ok(Json(detail))
}

pub async fn rename_session(
    State(state): State<AppState>,
    Identity(owner): Identity,
    Path(id): Path<String>,
    payload: Result<Json<RenameSessionRequest>, JsonRejection>,
) -> ApiResult<Json<ChatSession>> {
    let request = body(payload)?;
    let session = state
        .directory
        .rename_session(&owner, &SessionId::new(id), &request.title)
        .await?;
    Ok(Json(session))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Identity(owner): Identity,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .directory
        .delete_session(&owner, &SessionId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_messages(
    State(state): State<AppState>,
    Identity(owner): Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ChatMessage>>> {
    let messages = state
        .directory
        .list_messages(&owner, &SessionId::new(id))
        .await?;
    Ok(Json(messages))
}

pub async fn submit_turn(
    State(state): State<AppState>,
    Identity(owner): Identity,
    Path(id): Path<String>,
    payload: Result<Json<SubmitTurnRequest>, JsonRejection>,
) -> ApiResult<Json<TurnOutcome>> {
    let request = body(payload)?;
    let outcome = state
        .turns
        .execute(SubmitTurnInput::new(owner, SessionId::new(id), request.content))
        .await?;
    Ok(Json(outcome))
}
