//! Gate configuration and shared state.

use std::time::Duration;

use crate::session::{users::UserStore, SessionStore};

pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 12 * 60 * 60;

#[derive(Clone, Debug)]
pub struct GateConfig {
    base_url: String,
    session_ttl_seconds: u64,
}

impl GateConfig {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn session_cookie_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Everything the gate and the site handlers share: configuration plus the
/// session and user stores.
pub struct GateState {
    config: GateConfig,
    sessions: SessionStore,
    users: UserStore,
}

impl GateState {
    #[must_use]
    pub fn new(config: GateConfig) -> Self {
        let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_seconds()));
        Self {
            config,
            sessions,
            users: UserStore::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_config_defaults_and_overrides() {
        let config = GateConfig::new("http://localhost:8080".to_string());
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.session_ttl_seconds(), DEFAULT_SESSION_TTL_SECONDS);
        assert!(!config.session_cookie_secure());

        let config = config.with_session_ttl_seconds(600);
        assert_eq!(config.session_ttl_seconds(), 600);
    }

    #[test]
    fn secure_cookie_follows_base_url_scheme() {
        let config = GateConfig::new("https://example.test".to_string());
        assert!(config.session_cookie_secure());
    }
}
