// ABOUTME: Session token issuance and validation for authenticated users
// ABOUTME: Generates opaque bearer tokens, stores them hashed, and resolves them to identities
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session management.
//!
//! Identity federation itself (OAuth sign-in) is an external collaborator;
//! this module owns only the resulting sessions. Tokens are opaque random
//! values handed to the client and stored server-side as SHA-256 hashes, so
//! a leaked sessions table cannot be replayed.

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

/// Session token prefix, distinguishes ladle session tokens in logs and
/// client storage from third-party credentials
const TOKEN_PREFIX: &str = "ls_";
/// Random length of the token body
const TOKEN_RANDOM_LEN: usize = 32;

/// Resolved caller identity attached to every authenticated request
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Canonical user key
    pub user_id: Uuid,
    /// Email of the authenticated user
    pub email: String,
}

/// Generate a new opaque session token
#[must_use]
pub fn generate_session_token() -> String {
    let random_body: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{TOKEN_PREFIX}{random_body}")
}

/// Hash a session token for storage and lookup
#[must_use]
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Issues and resolves sessions against the backing store
#[derive(Clone)]
pub struct SessionManager {
    database: Arc<Database>,
    session_expiry: Duration,
}

impl SessionManager {
    /// Create a new session manager
    #[must_use]
    pub fn new(database: Arc<Database>, session_expiry_hours: u64) -> Self {
        Self {
            database,
            session_expiry: Duration::hours(i64::try_from(session_expiry_hours).unwrap_or(24)),
        }
    }

    /// Issue a new session for a user, returning the plaintext token.
    ///
    /// The plaintext is never persisted; only its hash is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the store fails.
    pub async fn issue_session(&self, user_id: Uuid) -> AppResult<String> {
        self.database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

        let token = generate_session_token();
        let expires_at = Utc::now() + self.session_expiry;
        self.database
            .create_session(user_id, &hash_token(&token), expires_at)
            .await?;
        Ok(token)
    }

    /// Resolve a plaintext session token to a verified identity.
    ///
    /// # Errors
    ///
    /// Returns an authentication error for unknown or expired tokens.
    pub async fn resolve(&self, token: &str) -> AppResult<AuthResult> {
        let user = self
            .database
            .get_session_user(&hash_token(token))
            .await?
            .ok_or_else(|| AppError::auth_invalid("Session expired or unknown"))?;

        self.database.update_last_active(user.id).await?;

        Ok(AuthResult {
            user_id: user.id,
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_format() {
        let token = generate_session_token();
        assert!(token.starts_with(TOKEN_PREFIX));
        assert_eq!(token.len(), TOKEN_PREFIX.len() + TOKEN_RANDOM_LEN);
        // Tokens are unique
        assert_ne!(token, generate_session_token());
    }

    #[test]
    fn test_hash_is_stable_and_opaque() {
        let token = generate_session_token();
        assert_eq!(hash_token(&token), hash_token(&token));
        assert_ne!(hash_token(&token), token);
        assert_eq!(hash_token(&token).len(), 64);
    }
}
