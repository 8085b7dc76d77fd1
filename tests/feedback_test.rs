// ABOUTME: Integration tests for the dietary feedback aggregator
// ABOUTME: Covers append-only records, threshold-based review flagging, and re-evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use ladle::database::{DietaryFeedbackSubmission, REVIEW_THRESHOLD};
use ladle::errors::ErrorCode;
use uuid::Uuid;

fn disputing_submission() -> DietaryFeedbackSubmission {
    DietaryFeedbackSubmission {
        low_fodmap_incorrect: true,
        fermented_incorrect: false,
        pescatarian_incorrect: false,
        comment: Some("contains garlic".to_owned()),
        current_analysis: serde_json::json!({"lowFodmap": true}),
    }
}

fn agreeing_submission() -> DietaryFeedbackSubmission {
    DietaryFeedbackSubmission {
        low_fodmap_incorrect: false,
        fermented_incorrect: false,
        pescatarian_incorrect: false,
        comment: None,
        current_analysis: serde_json::Value::Null,
    }
}

#[tokio::test]
async fn test_unknown_recipe_is_rejected() {
    let database = common::create_test_database().await.unwrap();

    let error = database
        .submit_dietary_feedback(Uuid::new_v4(), &disputing_submission())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_records_are_append_only() {
    let database = common::create_test_database().await.unwrap();
    let recipe = common::seed_recipe(&database, "Kimchi Stew").await.unwrap();

    // Repeat submissions all count; there is no submitter deduplication
    for _ in 0..2 {
        database
            .submit_dietary_feedback(recipe.id, &disputing_submission())
            .await
            .unwrap();
    }

    let records = database.list_dietary_feedback(recipe.id).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.low_fodmap_incorrect));
}

#[tokio::test]
async fn test_threshold_flags_recipe_for_review() {
    let database = common::create_test_database().await.unwrap();
    let recipe = common::seed_recipe(&database, "Miso Soup").await.unwrap();

    for n in 1..REVIEW_THRESHOLD {
        let outcome = database
            .submit_dietary_feedback(recipe.id, &disputing_submission())
            .await
            .unwrap();
        assert_eq!(outcome.dispute_count, n);
        assert!(!outcome.review_flagged);
    }
    let stored = database.get_recipe(recipe.id).await.unwrap().unwrap();
    assert!(!stored.needs_review);

    let outcome = database
        .submit_dietary_feedback(recipe.id, &disputing_submission())
        .await
        .unwrap();
    assert_eq!(outcome.dispute_count, REVIEW_THRESHOLD);
    assert!(outcome.review_flagged);

    let stored = database.get_recipe(recipe.id).await.unwrap().unwrap();
    assert!(stored.needs_review);
}

#[tokio::test]
async fn test_non_disputing_feedback_does_not_count() {
    let database = common::create_test_database().await.unwrap();
    let recipe = common::seed_recipe(&database, "Salad").await.unwrap();

    for _ in 0..5 {
        let outcome = database
            .submit_dietary_feedback(recipe.id, &agreeing_submission())
            .await
            .unwrap();
        assert_eq!(outcome.dispute_count, 0);
        assert!(!outcome.review_flagged);
    }

    let stored = database.get_recipe(recipe.id).await.unwrap().unwrap();
    assert!(!stored.needs_review);
    assert_eq!(database.list_dietary_feedback(recipe.id).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_flag_is_re_evaluated_on_every_submission() {
    let database = common::create_test_database().await.unwrap();
    let recipe = common::seed_recipe(&database, "Sauerkraut").await.unwrap();

    for _ in 0..REVIEW_THRESHOLD {
        database
            .submit_dietary_feedback(recipe.id, &disputing_submission())
            .await
            .unwrap();
    }

    // Simulate a moderator clearing the flag
    sqlx::query("UPDATE recipes SET needs_review = 0 WHERE id = $1")
        .bind(recipe.id.to_string())
        .execute(database.pool())
        .await
        .unwrap();

    // The next qualifying report re-raises it, not just the crossing one
    let outcome = database
        .submit_dietary_feedback(recipe.id, &disputing_submission())
        .await
        .unwrap();
    assert!(outcome.review_flagged);
    assert_eq!(outcome.dispute_count, REVIEW_THRESHOLD + 1);

    let stored = database.get_recipe(recipe.id).await.unwrap().unwrap();
    assert!(stored.needs_review);
}

#[tokio::test]
async fn test_analysis_snapshot_round_trips() {
    let database = common::create_test_database().await.unwrap();
    let recipe = common::seed_recipe(&database, "Tempeh Bowl").await.unwrap();

    let submission = DietaryFeedbackSubmission {
        low_fodmap_incorrect: false,
        fermented_incorrect: true,
        pescatarian_incorrect: false,
        comment: Some("tempeh is fermented".to_owned()),
        current_analysis: serde_json::json!({"fermented": false, "confidence": 0.8}),
    };
    database
        .submit_dietary_feedback(recipe.id, &submission)
        .await
        .unwrap();

    let records = database.list_dietary_feedback(recipe.id).await.unwrap();
    assert_eq!(records[0].analysis_snapshot["confidence"], 0.8);
    assert_eq!(records[0].comment.as_deref(), Some("tempeh is fermented"));
}
