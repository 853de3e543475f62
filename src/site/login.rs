//! The login screen and the credential check behind it.

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use super::{escape_html, page};
use crate::gate::{
    notices::{self, Notice, Severity},
    safe_redirect_target,
    state::GateState,
};
use crate::session;

/// Style rule hiding the site-title heading and the back-to-site link on the
/// login screen.
pub const LOGIN_HEAD_CSS: &str = "#login h1, #backtoblog { display: none; }";

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    redirect_to: String,
    /// Candidate display message; non-empty suppresses the default notice.
    #[serde(default)]
    message: String,
    /// Structured error code set by the login/signup handlers.
    #[serde(default)]
    error: String,
    /// Secondary single-slot error, raw text.
    #[serde(default)]
    err: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub redirect_to: String,
}

fn error_text(code: &str) -> Option<&'static str> {
    match code {
        "invalid" => Some("Invalid username or password."),
        "empty" => Some("Username and password are required."),
        "session" => Some("Could not start a session. Please try again."),
        _ => None,
    }
}

/// Render the login screen with its notices composed for this pass.
pub async fn login_screen(Query(query): Query<LoginQuery>) -> Html<String> {
    let mut errors = Vec::new();
    if let Some(text) = error_text(&query.error) {
        errors.push(Notice::error(text));
    }
    let notices = notices::compose_login_notices(&query.message, errors, Some(&query.err));

    let mut body = String::from("<div id=\"login\">\n<h1>Cancello</h1>\n");
    if !query.message.trim().is_empty() {
        body.push_str(&format!(
            "<p class=\"message\">{}</p>\n",
            escape_html(&query.message)
        ));
    }
    if !query.err.trim().is_empty() {
        body.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(&query.err)
        ));
    }
    for notice in &notices {
        let class = match notice.severity {
            Severity::Info => "notice",
            Severity::Error => "error",
        };
        body.push_str(&format!(
            "<p class=\"{class}\">{}</p>\n",
            escape_html(&notice.text)
        ));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"/login\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <input type=\"hidden\" name=\"redirect_to\" value=\"{}\">\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p><a href=\"/signup\">Create an account</a></p>\n\
         <p id=\"backtoblog\"><a href=\"/\">Back to site</a></p>\n\
         </div>",
        escape_html(&query.redirect_to)
    ));

    page("Log in", &format!("<style>{LOGIN_HEAD_CSS}</style>\n"), &body)
}

/// Verify credentials, start a session, and return to the original page.
pub async fn login(State(state): State<Arc<GateState>>, Form(form): Form<LoginForm>) -> Response {
    let username = form.username.trim().to_string();
    if username.is_empty() || form.password.is_empty() {
        return back_with_error("empty", &form.redirect_to);
    }

    let password = SecretString::from(form.password);
    let Some(user) = state.users().verify(&username, &password).await else {
        info!(%username, "login failed");
        return back_with_error("invalid", &form.redirect_to);
    };

    let token = match session::generate_session_token() {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to generate session token: {err}");
            return back_with_error("session", &form.redirect_to);
        }
    };
    let token_hash = session::hash_session_token(&token);
    state
        .sessions()
        .insert(token_hash, user.id, user.username.clone())
        .await;

    let mut headers = HeaderMap::new();
    match session::session_cookie(state.config(), &token) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    info!(username = %user.username, "login succeeded");
    (
        headers,
        Redirect::to(safe_redirect_target(&form.redirect_to)),
    )
        .into_response()
}

fn back_with_error(code: &str, redirect_to: &str) -> Response {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("error", code);
    if !redirect_to.is_empty() {
        serializer.append_pair("redirect_to", redirect_to);
    }
    let query = serializer.finish();
    Redirect::to(&format!("/login?{query}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::notices::DEFAULT_LOGIN_NOTICE;

    #[tokio::test]
    async fn login_screen_shows_default_notice_when_quiet() {
        let Html(html) = login_screen(Query(LoginQuery::default())).await;
        assert!(html.contains(DEFAULT_LOGIN_NOTICE));
        assert!(html.contains(LOGIN_HEAD_CSS));
        assert!(html.contains("#backtoblog"));
    }

    #[tokio::test]
    async fn login_screen_message_replaces_default_notice() {
        let query = LoginQuery {
            message: "Account created. Please log in.".to_string(),
            ..LoginQuery::default()
        };
        let Html(html) = login_screen(Query(query)).await;
        assert!(html.contains("Account created. Please log in."));
        assert!(!html.contains(DEFAULT_LOGIN_NOTICE));
    }

    #[tokio::test]
    async fn login_screen_error_replaces_default_notice() {
        let query = LoginQuery {
            error: "invalid".to_string(),
            ..LoginQuery::default()
        };
        let Html(html) = login_screen(Query(query)).await;
        assert!(html.contains("Invalid username or password."));
        assert!(!html.contains(DEFAULT_LOGIN_NOTICE));
    }

    #[tokio::test]
    async fn login_screen_escapes_redirect_value() {
        let query = LoginQuery {
            redirect_to: "/\"><script>".to_string(),
            ..LoginQuery::default()
        };
        let Html(html) = login_screen(Query(query)).await;
        assert!(!html.contains("\"><script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }
}
