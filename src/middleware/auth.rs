// ABOUTME: Session guard resolving caller identity from inbound requests
// ABOUTME: Checks bearer tokens and session cookies before any store operation runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::auth::{AuthResult, SessionManager};
use crate::errors::{AppError, AppResult};
use http::header::{AUTHORIZATION, COOKIE};
use http::HeaderMap;

/// Cookie carrying the session token for browser clients
const SESSION_COOKIE: &str = "session_token";

/// Guards request handlers behind a verified identity.
///
/// Handlers call [`SessionGuard::authenticate`] before touching the store;
/// an unauthenticated request terminates with a 401 and no partial
/// processing happens.
#[derive(Clone)]
pub struct SessionGuard {
    session_manager: SessionManager,
}

impl SessionGuard {
    /// Create a guard over the given session manager
    #[must_use]
    pub const fn new(session_manager: SessionManager) -> Self {
        Self { session_manager }
    }

    /// Resolve the caller's identity from request headers.
    ///
    /// Accepts an `Authorization: Bearer` header or a `session_token`
    /// cookie, in that order.
    ///
    /// # Errors
    ///
    /// Returns a 401 authentication error when no credential is present or
    /// the presented token is unknown or expired.
    pub async fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let token = extract_bearer_token(headers)
            .or_else(|| extract_cookie_value(headers, SESSION_COOKIE))
            .ok_or_else(AppError::auth_required)?;

        self.session_manager.resolve(&token).await
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
}

fn extract_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (key, value) = pair.trim().split_once('=')?;
                (key == name).then(|| value.to_owned())
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_bearer_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer ls_abc123"));
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("ls_abc123"));
    }

    #[test]
    fn test_bearer_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert!(extract_bearer_token(&headers).is_none());
    }

    #[test]
    fn test_cookie_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session_token=ls_xyz; lang=en"),
        );
        assert_eq!(
            extract_cookie_value(&headers, SESSION_COOKIE).as_deref(),
            Some("ls_xyz")
        );
    }

    #[test]
    fn test_missing_credentials() {
        let headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_none());
        assert!(extract_cookie_value(&headers, SESSION_COOKIE).is_none());
    }
}
