//! Session tokens, cookies, and the in-memory session map.
//!
//! Tokens are random 32-byte values handed to the browser; only their SHA-256
//! hash is kept server-side and used for lookups.

use anyhow::{Context, Result};
use axum::http::{
    header::{InvalidHeaderValue, AUTHORIZATION, COOKIE},
    HeaderMap, HeaderValue,
};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::gate::state::GateConfig;

pub mod users;

pub const SESSION_COOKIE_NAME: &str = "cancello_session";

/// Create a new session token for the auth cookie.
/// The raw value is only returned to set the cookie; the store keeps a hash.
pub fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Hash a session token so raw values never touch the store.
#[must_use]
pub fn hash_session_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

/// Build a secure `HttpOnly` cookie for the session token.
pub fn session_cookie(config: &GateConfig, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    // Only mark cookies secure when the site is served over HTTPS.
    let secure = config.session_cookie_secure();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub fn clear_session_cookie(config: &GateConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = config.session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Pull the session token from the `Authorization` header or the cookie jar.
#[must_use]
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        // Pairs without '=' are malformed; skip them instead of giving up.
        let Some((key, val)) = pair.trim().split_once('=') else {
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME {
            return Some(val.trim().to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
    created_at: Instant,
}

/// In-memory session map keyed by token hash. Expired entries are pruned on
/// insert and ignored on lookup; there is no persistence.
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<Vec<u8>, Session>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, token_hash: Vec<u8>, user_id: Uuid, username: String) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.created_at.elapsed() < self.ttl);
        sessions.insert(
            token_hash,
            Session {
                user_id,
                username,
                created_at: Instant::now(),
            },
        );
    }

    pub async fn lookup(&self, token_hash: &[u8]) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token_hash)
            .filter(|session| session.created_at.elapsed() < self.ttl)
            .cloned()
    }

    pub async fn remove(&self, token_hash: &[u8]) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token_hash);
    }

    /// Number of live sessions, ignoring entries past their TTL.
    pub async fn count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .filter(|session| session.created_at.elapsed() < self.ttl)
            .count()
    }
}
