//! The access gate: a per-request authentication check that runs before any
//! page handler. Exempt screens (login, signup) always pass; everything else
//! requires a live session or gets redirected to the login screen with the
//! original destination preserved.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::session;

pub mod logout_url;
pub mod notices;
pub mod state;

use state::GateState;

/// The logical screen a request path maps to. Only the login and signup
/// screens are exempt from the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Other,
}

impl Screen {
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn is_exempt(self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }
}

/// Identity of the authenticated caller, inserted into request extensions by
/// the gate so downstream handlers never re-resolve the session.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Gate middleware. Recomputed on every request; no caching, no bypass.
pub async fn require_login(
    State(state): State<Arc<GateState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let screen = Screen::from_path(req.uri().path());
    if screen.is_exempt() {
        return next.run(req).await;
    }

    match authenticate(&state, req.headers()).await {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => {
            debug!(path = %req.uri().path(), "unauthenticated request, redirecting to login");
            Redirect::to(&login_redirect_url(req.uri())).into_response()
        }
    }
}

/// Resolve the session cookie (or bearer token) into the current user.
async fn authenticate(state: &GateState, headers: &HeaderMap) -> Option<CurrentUser> {
    let token = session::extract_session_token(headers)?;
    let token_hash = session::hash_session_token(&token);
    state
        .sessions()
        .lookup(&token_hash)
        .await
        .map(|session| CurrentUser {
            user_id: session.user_id,
            username: session.username,
        })
}

/// Login entry point carrying the original destination for post-login return.
#[must_use]
pub fn login_redirect_url(uri: &Uri) -> String {
    let original = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    let encoded: String = url::form_urlencoded::byte_serialize(original.as_bytes()).collect();
    format!("/login?redirect_to={encoded}")
}

/// Restrict post-login return targets to local absolute paths so the login
/// screen cannot be used as an open redirect.
#[must_use]
pub fn safe_redirect_target(raw: &str) -> &str {
    if raw.starts_with('/') && !raw.starts_with("//") && !raw.contains('\\') {
        raw
    } else {
        "/"
    }
}
