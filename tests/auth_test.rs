// ABOUTME: Integration tests for users and session resolution
// ABOUTME: Covers token issuance, expiry, unique emails, and inactive accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use chrono::{Duration, Utc};
use ladle::auth::{hash_token, SessionManager};
use ladle::errors::ErrorCode;
use ladle::models::User;
use uuid::Uuid;

#[tokio::test]
async fn test_issue_and_resolve_session() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();

    let manager = SessionManager::new(database.clone(), 24);
    let token = manager.issue_session(user.id).await.unwrap();
    assert!(token.starts_with("ls_"));

    let auth = manager.resolve(&token).await.unwrap();
    assert_eq!(auth.user_id, user.id);
    assert_eq!(auth.email, user.email);
}

#[tokio::test]
async fn test_issue_session_for_unknown_user_fails() {
    let database = common::create_test_database().await.unwrap();

    let manager = SessionManager::new(database, 24);
    let error = manager.issue_session(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();

    let token = "ls_expiredexpiredexpiredexpiredxx";
    database
        .create_session(user.id, &hash_token(token), Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    let manager = SessionManager::new(database, 24);
    let error = manager.resolve(token).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthInvalid);
}

#[tokio::test]
async fn test_inactive_user_session_is_rejected() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();

    let manager = SessionManager::new(database.clone(), 24);
    let token = manager.issue_session(user.id).await.unwrap();

    sqlx::query("UPDATE users SET is_active = 0 WHERE id = $1")
        .bind(user.id.to_string())
        .execute(database.pool())
        .await
        .unwrap();

    assert!(manager.resolve(&token).await.is_err());
}

#[tokio::test]
async fn test_email_must_be_unique() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();

    let duplicate = User::new(user.email.clone(), Some("Someone Else".to_owned()));
    let error = database.create_user(&duplicate).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    // Email stays a lookup key only; the id is canonical
    let found = database.get_user_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
}
