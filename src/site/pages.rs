//! The gated content surface: the home page and the feed.

use axum::{
    extract::OriginalUri,
    http::header,
    response::{Html, IntoResponse},
    Extension,
};

use super::{escape_html, logout::logout_action, page};
use crate::gate::CurrentUser;

/// Home page. The gate guarantees an authenticated caller reaches this
/// handler, so the extension is always present in practice.
pub async fn home(
    user: Option<Extension<CurrentUser>>,
    OriginalUri(uri): OriginalUri,
) -> Html<String> {
    let username = user
        .as_ref()
        .map_or("visitor", |Extension(user)| user.username.as_str());

    let body = format!(
        "<h1>Welcome, {username}</h1>\n\
         <p>This entire site sits behind the login gate, feeds included.</p>\n\
         <ul>\n\
         <li><a href=\"/feed\">Content feed</a></li>\n\
         </ul>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <button type=\"submit\">Log out</button>\n\
         </form>",
        username = escape_html(username),
        action = logout_action(uri.path()),
    );

    page("Home", "", &body)
}

const FEED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
<title>Cancello</title>
<link>/</link>
<description>Posts behind the login gate</description>
<item>
<title>The gate is up</title>
<link>/</link>
<description>Every page of this site requires a login, this feed included.</description>
</item>
<item>
<title>Welcome</title>
<link>/</link>
<description>Create an account on the signup screen, then log in.</description>
</item>
</channel>
</rss>
"#;

/// Content feed. Served only to authenticated callers; the gate redirects
/// everyone else before this handler runs.
pub async fn feed() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        FEED_XML,
    )
}
