//! The gated site: HTML pages, the content feed, and the auth screens.

use axum::{
    middleware,
    response::Html,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::gate::{self, state::GateState};

pub mod login;
pub mod logout;
pub mod pages;
pub mod signup;

/// Site router with the gate layered in front of every page, feed included.
/// Exemptions for the login and signup screens live in the gate itself, so
/// ordering here cannot open a bypass window.
pub fn router(state: Arc<GateState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/feed", get(pages::feed))
        .route("/login", get(login::login_screen).post(login::login))
        .route("/signup", get(signup::signup_screen).post(signup::signup))
        .route("/logout", post(logout::logout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::require_login,
        ))
        .with_state(state)
}

/// Minimal HTML escaping for text and attribute values.
pub(crate) fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Shared document shell. `head_extra` is emitted verbatim inside `<head>`.
pub(crate) fn page(title: &str, head_extra: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Cancello</title>\n{head_extra}</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn page_shell_escapes_title_but_not_head() {
        let Html(html) = page("A & B", "<style>x</style>", "<p>hi</p>");
        assert!(html.contains("<title>A &amp; B - Cancello</title>"));
        assert!(html.contains("<style>x</style>"));
        assert!(html.contains("<p>hi</p>"));
    }
}
