//! Session status endpoint for cookie and bearer auth.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::gate::state::GateState;
use crate::session::{extract_session_token, hash_session_token};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    user_id: String,
    username: String,
}

#[utoipa::path(
    get,
    path = "/v1/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "session"
)]
pub async fn session(headers: HeaderMap, State(state): State<Arc<GateState>>) -> impl IntoResponse {
    // Missing cookies are treated as "no session" to avoid leaking auth state.
    let Some(token) = extract_session_token(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    let token_hash = hash_session_token(&token);
    match state.sessions().lookup(&token_hash).await {
        Some(session) => {
            let response = SessionResponse {
                user_id: session.user_id.to_string(),
                username: session.username,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
