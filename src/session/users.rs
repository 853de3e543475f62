//! In-memory user registry with Argon2id password hashes.

use argon2::{
    password_hash::{Error as PasswordHashError, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::rngs::OsRng;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Lowercase alphanumeric usernames, underscores and dashes, 3 to 32 chars.
#[must_use]
pub fn valid_username(username: &str) -> bool {
    Regex::new(r"^[a-z0-9][a-z0-9_-]{2,31}$").is_ok_and(|re| re.is_match(username))
}

#[derive(Debug, PartialEq, Eq)]
pub enum SignupError {
    UsernameTaken,
    InvalidUsername,
    WeakPassword,
    Hashing,
}

#[derive(Clone, Debug)]
pub struct VerifiedUser {
    pub id: Uuid,
    pub username: String,
}

struct UserRecord {
    id: Uuid,
    password_hash: String,
}

/// User accounts created through the signup screen. Raw passwords are never
/// stored, only Argon2id hashes.
#[derive(Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Uuid, SignupError> {
        if !valid_username(username) {
            return Err(SignupError::InvalidUsername);
        }
        if password.expose_secret().len() < MIN_PASSWORD_LENGTH {
            return Err(SignupError::WeakPassword);
        }

        let password_hash = hash_password(password).map_err(|_| SignupError::Hashing)?;

        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(SignupError::UsernameTaken);
        }

        let id = Uuid::new_v4();
        users.insert(
            username.to_string(),
            UserRecord { id, password_hash },
        );
        Ok(id)
    }

    /// Check a username/password pair against the registry.
    ///
    /// Returns `None` for unknown users and wrong passwords alike, so callers
    /// cannot tell the two apart.
    pub async fn verify(&self, username: &str, password: &SecretString) -> Option<VerifiedUser> {
        let users = self.users.read().await;
        let record = users.get(username)?;
        let parsed = PasswordHash::new(&record.password_hash).ok()?;
        Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .ok()?;
        Some(VerifiedUser {
            id: record.id,
            username: username.to_string(),
        })
    }
}

fn hash_password(password: &SecretString) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)?
        .to_string())
}
