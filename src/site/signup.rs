//! The signup screen. Exempt from the gate so visitors can create the
//! account they will log in with.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::{escape_html, page};
use crate::gate::state::GateState;
use crate::session::users::{SignupError, MIN_PASSWORD_LENGTH};

#[derive(Debug, Default, Deserialize)]
pub struct SignupQuery {
    #[serde(default)]
    redirect_to: String,
    #[serde(default)]
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub redirect_to: String,
}

fn error_text(code: &str) -> Option<String> {
    match code {
        "taken" => Some("That username is already taken.".to_string()),
        "username" => {
            Some("Usernames are 3-32 lowercase letters, digits, dashes or underscores.".to_string())
        }
        "password" => Some(format!(
            "Passwords must be at least {MIN_PASSWORD_LENGTH} characters."
        )),
        "internal" => Some("Could not create the account. Please try again.".to_string()),
        _ => None,
    }
}

pub async fn signup_screen(Query(query): Query<SignupQuery>) -> Html<String> {
    let mut body = String::from("<div id=\"signup\">\n<h1>Create an account</h1>\n");
    if let Some(text) = error_text(&query.error) {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(&text)));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"/signup\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <input type=\"hidden\" name=\"redirect_to\" value=\"{}\">\n\
         <button type=\"submit\">Sign up</button>\n\
         </form>\n\
         <p><a href=\"/login\">Already have an account? Log in</a></p>\n\
         </div>",
        escape_html(&query.redirect_to)
    ));

    page("Sign up", "", &body)
}

/// Create the account and bounce to the login screen with a confirmation
/// message; the message takes the place of the default login notice.
pub async fn signup(State(state): State<Arc<GateState>>, Form(form): Form<SignupForm>) -> Response {
    let username = form.username.trim().to_string();
    let password = SecretString::from(form.password);

    match state.users().register(&username, &password).await {
        Ok(_) => {
            info!(%username, "account created");
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            serializer.append_pair("message", "Account created. Please log in.");
            if !form.redirect_to.is_empty() {
                serializer.append_pair("redirect_to", &form.redirect_to);
            }
            let query = serializer.finish();
            Redirect::to(&format!("/login?{query}")).into_response()
        }
        Err(err) => {
            let code = match err {
                SignupError::UsernameTaken => "taken",
                SignupError::InvalidUsername => "username",
                SignupError::WeakPassword => "password",
                SignupError::Hashing => "internal",
            };
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            serializer.append_pair("error", code);
            if !form.redirect_to.is_empty() {
                serializer.append_pair("redirect_to", &form.redirect_to);
            }
            let query = serializer.finish();
            Redirect::to(&format!("/signup?{query}")).into_response()
        }
    }
}
