//! Logout URL cleanup.
//!
//! Logout links are generated with the page's own `redirect_to` parameter,
//! which would bounce a freshly logged-out visitor straight back through the
//! gate into another login prompt. Stripping the parameter makes logout land
//! on a clean screen. The input URL is already HTML-escaped for embedding in
//! markup (`&` as `&amp;`), and so is the output.

use url::Url;

/// Remove the `redirect_to=<target>` parameter from an HTML-escaped logout
/// URL. An empty target returns the URL unchanged. Total function: input that
/// cannot be improved passes through as-is.
#[must_use]
pub fn sanitize_logout_url(logout_url: &str, redirect_to: &str) -> String {
    if redirect_to.is_empty() {
        return logout_url.to_string();
    }
    // Prefer a structured edit over patching the escaped text.
    if let Some(clean) = rebuild_without_redirect(logout_url, redirect_to) {
        return clean;
    }
    strip_redirect_param(logout_url, redirect_to)
}

/// Unescape, parse, drop matching `redirect_to` pairs, rebuild, re-escape.
/// A URL without a matching pair comes back byte-identical to the input;
/// re-serializing it would alter encoding the caller never asked to change.
fn rebuild_without_redirect(escaped: &str, target: &str) -> Option<String> {
    let raw = escaped.replace("&amp;", "&");
    let mut url = Url::parse(&raw).ok()?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let remaining: Vec<(String, String)> = pairs
        .iter()
        .filter(|(key, value)| !(key == "redirect_to" && value == target))
        .cloned()
        .collect();
    if remaining.len() == pairs.len() {
        return Some(escaped.to_string());
    }

    if remaining.is_empty() {
        url.set_query(None);
    } else {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &remaining {
            serializer.append_pair(key, value);
        }
        let query = serializer.finish();
        url.set_query(Some(&query));
    }

    Some(url.to_string().replace('&', "&amp;"))
}

/// Escaped-string fallback for input `Url` cannot parse (relative links).
/// Removes the encoded pair, then collapses the punctuation left behind.
fn strip_redirect_param(escaped: &str, target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    let without = escaped.replace(&format!("redirect_to={encoded}"), "");
    let collapsed = without.replace("?&amp;", "?").replace("&amp;&amp;", "&amp;");
    collapsed
        .trim_end_matches("&amp;")
        .trim_end_matches(['?', '&'])
        .to_string()
}
