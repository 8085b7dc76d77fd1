// ABOUTME: Dietary Feedback Aggregator database operations
// ABOUTME: Append-only classification disputes with threshold-based review flagging

use super::allergies::parse_id;
use super::users::parse_timestamp;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::DietaryFeedback;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// Number of classification-disputing reports that flags a recipe for
/// manual review
pub const REVIEW_THRESHOLD: i64 = 3;

/// One submitted dietary feedback record. Repeat submissions from the same
/// actor are counted; there is no submitter deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietaryFeedbackSubmission {
    /// Whether the low-FODMAP classification is disputed
    pub low_fodmap_incorrect: bool,
    /// Whether the fermented classification is disputed
    pub fermented_incorrect: bool,
    /// Whether the pescatarian classification is disputed
    pub pescatarian_incorrect: bool,
    /// Free-text comment
    pub comment: Option<String>,
    /// Snapshot of the analysis the submitter is disputing
    pub current_analysis: serde_json::Value,
}

/// Result of a feedback submission
#[derive(Debug, Clone)]
pub struct FeedbackOutcome {
    /// Identifier of the appended feedback record
    pub feedback_id: Uuid,
    /// Number of classification-disputing reports now on the recipe
    pub dispute_count: i64,
    /// Whether this submission triggered the review flag update
    pub review_flagged: bool,
}

impl Database {
    /// Create the dietary feedback table
    pub(super) async fn migrate_feedback(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS dietary_feedback (
                id TEXT PRIMARY KEY,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                low_fodmap_incorrect BOOLEAN NOT NULL DEFAULT 0,
                fermented_incorrect BOOLEAN NOT NULL DEFAULT 0,
                pescatarian_incorrect BOOLEAN NOT NULL DEFAULT 0,
                comment TEXT,
                analysis_snapshot TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_dietary_feedback_recipe_id ON dietary_feedback(recipe_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Append one dietary feedback record and re-evaluate the review
    /// threshold.
    ///
    /// The record is appended unconditionally. Afterwards the number of
    /// reports disputing at least one classification is recounted, and at or
    /// above [`REVIEW_THRESHOLD`] the recipe's `needs_review` flag is set.
    /// The check runs on every submission, not just on crossing, so a
    /// manually cleared flag is re-raised by the next qualifying report.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the recipe does not exist, or a
    /// database error if the store fails.
    pub async fn submit_dietary_feedback(
        &self,
        recipe_id: Uuid,
        submission: &DietaryFeedbackSubmission,
    ) -> AppResult<FeedbackOutcome> {
        if !self.recipe_exists(recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        let feedback_id = Uuid::new_v4();
        let snapshot = serde_json::to_string(&submission.current_analysis)?;

        sqlx::query(
            r"
            INSERT INTO dietary_feedback (
                id, recipe_id, low_fodmap_incorrect, fermented_incorrect,
                pescatarian_incorrect, comment, analysis_snapshot, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(feedback_id.to_string())
        .bind(recipe_id.to_string())
        .bind(submission.low_fodmap_incorrect)
        .bind(submission.fermented_incorrect)
        .bind(submission.pescatarian_incorrect)
        .bind(&submission.comment)
        .bind(&snapshot)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to record dietary feedback: {e}")))?;

        let dispute_count = self.count_disputing_feedback(recipe_id).await?;
        let review_flagged = dispute_count >= REVIEW_THRESHOLD;
        if review_flagged {
            self.mark_needs_review(recipe_id).await?;
            tracing::info!(
                recipe_id = %recipe_id,
                dispute_count,
                "recipe flagged for dietary classification review"
            );
        }

        Ok(FeedbackOutcome {
            feedback_id,
            dispute_count,
            review_flagged,
        })
    }

    /// Count feedback records disputing at least one classification
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn count_disputing_feedback(&self, recipe_id: Uuid) -> AppResult<i64> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS count
            FROM dietary_feedback
            WHERE recipe_id = $1
              AND (low_fodmap_incorrect = 1 OR fermented_incorrect = 1 OR pescatarian_incorrect = 1)
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to count dietary feedback: {e}")))?;

        Ok(row.try_get("count")?)
    }

    /// List all feedback records for a recipe, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_dietary_feedback(&self, recipe_id: Uuid) -> AppResult<Vec<DietaryFeedback>> {
        let rows = sqlx::query(
            r"
            SELECT id, low_fodmap_incorrect, fermented_incorrect, pescatarian_incorrect,
                   comment, analysis_snapshot, created_at
            FROM dietary_feedback
            WHERE recipe_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list dietary feedback: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let snapshot: String = row.try_get("analysis_snapshot")?;
                let created_at: String = row.try_get("created_at")?;
                Ok(DietaryFeedback {
                    id: parse_id(&id)?,
                    recipe_id,
                    low_fodmap_incorrect: row.try_get("low_fodmap_incorrect")?,
                    fermented_incorrect: row.try_get("fermented_incorrect")?,
                    pescatarian_incorrect: row.try_get("pescatarian_incorrect")?,
                    comment: row.try_get("comment")?,
                    analysis_snapshot: serde_json::from_str(&snapshot)?,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }
}
