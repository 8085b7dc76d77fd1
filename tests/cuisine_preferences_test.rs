// ABOUTME: Integration tests for the cuisine preference set manager
// ABOUTME: Covers replace-all semantics and strict pre-existing cuisine references
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use ladle::database::CuisinePreferenceEntry;
use ladle::errors::ErrorCode;
use ladle::models::AffinityLevel;

#[tokio::test]
async fn test_replace_all_discards_prior_set() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();
    common::seed_cuisine(&database, "italian", "Italian").await.unwrap();
    common::seed_cuisine(&database, "thai", "Thai").await.unwrap();

    database
        .replace_cuisine_preferences(
            user.id,
            &[CuisinePreferenceEntry {
                cuisine_id: "italian".to_owned(),
                level: AffinityLevel::Love,
            }],
        )
        .await
        .unwrap();

    let replaced = database
        .replace_cuisine_preferences(
            user.id,
            &[CuisinePreferenceEntry {
                cuisine_id: "thai".to_owned(),
                level: AffinityLevel::Like,
            }],
        )
        .await
        .unwrap();
    assert_eq!(replaced.len(), 1);

    let stored = database.list_cuisine_preferences(user.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].cuisine.id, "thai");
    assert_eq!(stored[0].level, AffinityLevel::Like);
}

#[tokio::test]
async fn test_unknown_cuisine_fails_whole_replacement() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();
    common::seed_cuisine(&database, "x1", "Mexican").await.unwrap();

    database
        .replace_cuisine_preferences(
            user.id,
            &[CuisinePreferenceEntry {
                cuisine_id: "x1".to_owned(),
                level: AffinityLevel::Neutral,
            }],
        )
        .await
        .unwrap();

    let error = database
        .replace_cuisine_preferences(
            user.id,
            &[
                CuisinePreferenceEntry {
                    cuisine_id: "x1".to_owned(),
                    level: AffinityLevel::Love,
                },
                CuisinePreferenceEntry {
                    cuisine_id: "bad-id".to_owned(),
                    level: AffinityLevel::Like,
                },
            ],
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ReferenceNotFound);
    assert!(error.message.contains("Cuisine with ID bad-id not found"));

    // The failed batch changed nothing, including its resolvable sibling
    let stored = database.list_cuisine_preferences(user.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].level, AffinityLevel::Neutral);
}

#[tokio::test]
async fn test_cuisines_are_never_auto_created() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database).await.unwrap();

    let result = database
        .replace_cuisine_preferences(
            user.id,
            &[CuisinePreferenceEntry {
                cuisine_id: "nowhere".to_owned(),
                level: AffinityLevel::Love,
            }],
        )
        .await;

    assert!(result.is_err());
    assert!(database.get_cuisine("nowhere").await.unwrap().is_none());
}
