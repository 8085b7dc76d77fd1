// ABOUTME: Integration tests for the favorites toggle
// ABOUTME: Covers idempotent add/remove, summary listing, and ids listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use ladle::database::FavoriteAction;
use ladle::errors::ErrorCode;
use uuid::Uuid;

#[tokio::test]
async fn test_add_twice_leaves_one_edge() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();
    let recipe = common::seed_recipe(&database, "Pad Thai").await.unwrap();

    database
        .set_favorite(user.id, recipe.id, FavoriteAction::Add)
        .await
        .unwrap();
    database
        .set_favorite(user.id, recipe.id, FavoriteAction::Add)
        .await
        .unwrap();

    let ids = database.list_favorite_ids(user.id).await.unwrap();
    assert_eq!(ids, vec![recipe.id]);
}

#[tokio::test]
async fn test_remove_absent_edge_is_a_no_op_success() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();
    let recipe = common::seed_recipe(&database, "Ramen").await.unwrap();

    database
        .set_favorite(user.id, recipe.id, FavoriteAction::Remove)
        .await
        .unwrap();

    assert!(database.list_favorite_ids(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_user_or_recipe_is_not_found() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();
    let recipe = common::seed_recipe(&database, "Tacos").await.unwrap();

    let error = database
        .set_favorite(Uuid::new_v4(), recipe.id, FavoriteAction::Add)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    let error = database
        .set_favorite(user.id, Uuid::new_v4(), FavoriteAction::Add)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_list_returns_summaries_only() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();
    let recipe = common::seed_recipe(&database, "Bibimbap").await.unwrap();

    database
        .set_favorite(user.id, recipe.id, FavoriteAction::Add)
        .await
        .unwrap();

    let favorites = database.list_favorites(user.id).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, recipe.id);
    assert_eq!(favorites[0].title, "Bibimbap");
    assert_eq!(favorites[0].cooking_time_minutes, 30);
}

#[tokio::test]
async fn test_ids_for_unknown_user_is_empty_not_error() {
    let database = common::create_test_database().await.unwrap();

    let ids = database.list_favorite_ids(Uuid::new_v4()).await.unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_toggle_roundtrip() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();
    let recipe = common::seed_recipe(&database, "Pho").await.unwrap();

    database
        .set_favorite(user.id, recipe.id, FavoriteAction::Add)
        .await
        .unwrap();
    database
        .set_favorite(user.id, recipe.id, FavoriteAction::Remove)
        .await
        .unwrap();

    assert!(database.list_favorites(user.id).await.unwrap().is_empty());
}
