//! End-to-end tests for the access gate: every page is gated, login and
//! signup stay reachable, and the full signup/login/logout flow works
//! against the assembled app.

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, StatusCode,
    },
    Router,
};
use cancello::{api, gate::state::GateConfig};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn app() -> Router {
    api::app(GateConfig::new("http://localhost:8080".to_string()))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .expect("request")
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Sign up and log in, returning the session cookie pair.
async fn login_as(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_form(
            "/signup",
            &format!("username={username}&password={password}"),
        ))
        .await
        .expect("signup");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            &format!("username={username}&password={password}&redirect_to=%2F"),
        ))
        .await
        .expect("login");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("session cookie");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

#[tokio::test]
async fn unauthenticated_pages_redirect_to_login() {
    let app = app();

    let response = app.clone().oneshot(get("/")).await.expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect_to=%2F");

    // Feeds are gated too.
    let response = app.clone().oneshot(get("/feed")).await.expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect_to=%2Ffeed");

    // The original query string survives the round trip.
    let response = app
        .clone()
        .oneshot(get("/feed?page=2"))
        .await
        .expect("response");
    assert_eq!(
        location(&response),
        "/login?redirect_to=%2Ffeed%3Fpage%3D2"
    );
}

#[tokio::test]
async fn login_and_signup_screens_are_always_reachable() {
    let app = app();

    let response = app.clone().oneshot(get("/login")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Please log in to view this site."));
    assert!(html.contains("#login h1, #backtoblog { display: none; }"));

    let response = app.clone().oneshot(get("/signup")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_screen_message_takes_priority_over_default_notice() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get("/login?message=Account%20created.%20Please%20log%20in."))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Account created. Please log in."));
    assert!(!html.contains("Please log in to view this site."));
}

#[tokio::test]
async fn authenticated_users_reach_every_page() {
    let app = app();
    let cookie = login_as(&app, "alice", "sup3rsecret").await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Welcome, alice"));

    let response = app
        .clone()
        .oneshot(get_with_cookie("/feed", &cookie))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Exempt screens stay reachable when authenticated.
    let response = app
        .clone()
        .oneshot(get_with_cookie("/login", &cookie))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn failed_login_bounces_back_with_error() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            "username=nobody&password=wrong-pass&redirect_to=%2Ffeed",
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/login?error=invalid&redirect_to=%2Ffeed"
    );

    let response = app
        .clone()
        .oneshot(get("/login?error=invalid"))
        .await
        .expect("response");
    let html = body_string(response).await;
    assert!(html.contains("Invalid username or password."));
    assert!(!html.contains("Please log in to view this site."));
}

#[tokio::test]
async fn login_redirect_target_must_be_local() {
    let app = app();
    let response = app
        .clone()
        .oneshot(post_form(
            "/signup",
            "username=carol&password=sup3rsecret",
        ))
        .await
        .expect("signup");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            "username=carol&password=sup3rsecret&redirect_to=https%3A%2F%2Fevil.test%2F",
        ))
        .await
        .expect("login");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn logout_clears_the_session_and_reinstates_the_gate() {
    let app = app();
    let cookie = login_as(&app, "bob", "sup3rsecret").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .header(COOKIE, &cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?message=You+are+now+logged+out.");
    let cleared = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("clearing cookie");
    assert!(cleared.contains("Max-Age=0"));

    // The old cookie no longer opens the gate.
    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect_to=%2F");
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_form("/signup", "username=dave&password=sup3rsecret"))
        .await
        .expect("signup");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(post_form("/signup", "username=dave&password=sup3rsecret"))
        .await
        .expect("signup");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/signup?error=taken");
}

#[tokio::test]
async fn operational_endpoints_are_outside_the_gate() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get("/v1/health"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("X-App"));
    let html = body_string(response).await;
    assert!(html.contains("\"active_sessions\":0"));

    let response = app
        .clone()
        .oneshot(get("/v1/session"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get("/v1/openapi.json"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn session_endpoint_reports_the_logged_in_user() {
    let app = app();
    let cookie = login_as(&app, "erin", "sup3rsecret").await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/v1/session", &cookie))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("\"username\":\"erin\""));
}
