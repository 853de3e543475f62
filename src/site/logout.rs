//! Logout handling and the sanitized logout link embedded in page chrome.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::error;

use crate::gate::{logout_url::sanitize_logout_url, state::GateState};
use crate::session;

/// Delete the session, clear the cookie, and land on a clean login screen.
pub async fn logout(State(state): State<Arc<GateState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session::extract_session_token(&headers) {
        let token_hash = session::hash_session_token(&token);
        state.sessions().remove(&token_hash).await;
    }

    // Always clear the cookie, even if the session record was missing.
    let mut response_headers = HeaderMap::new();
    match session::clear_session_cookie(state.config()) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build logout cookie: {err}"),
    }

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("message", "You are now logged out.");
    let query = serializer.finish();
    (
        response_headers,
        Redirect::to(&format!("/login?{query}")),
    )
        .into_response()
}

/// Markup-ready logout action for page chrome.
///
/// The raw URL carries the page's own `redirect_to`, the way every other link
/// on a gated page does; the sanitizer then strips it so logging out does not
/// bounce straight back through the gate into another login prompt.
#[must_use]
pub fn logout_action(current_path: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(current_path.as_bytes()).collect();
    let escaped = format!("/logout?redirect_to={encoded}").replace('&', "&amp;");
    sanitize_logout_url(&escaped, current_path)
}
