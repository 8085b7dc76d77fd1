// ABOUTME: Preference Store database operations
// ABOUTME: Reads and upserts the single cooking-preference record per user

use super::users::parse_timestamp;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Preference;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// Full set of preference fields. Partial updates are not supported; callers
/// resend all four fields on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    /// Preferred maximum cooking time in minutes
    pub cooking_time_minutes: i64,
    /// Self-reported skill level
    pub skill_level: String,
    /// Default serving size
    pub serving_size: i64,
    /// Whether the user meal-preps
    pub meal_prep: bool,
}

impl Database {
    /// Create the preferences table
    pub(super) async fn migrate_preferences(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS preferences (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                cooking_time_minutes INTEGER NOT NULL,
                skill_level TEXT NOT NULL,
                serving_size INTEGER NOT NULL,
                meal_prep BOOLEAN NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get the preference record for a user. Absence is a normal first-time
    /// state, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn get_preferences(&self, user_id: Uuid) -> AppResult<Option<Preference>> {
        let row = sqlx::query(
            r"
            SELECT user_id, cooking_time_minutes, skill_level, serving_size, meal_prep, updated_at
            FROM preferences
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get preferences: {e}")))?;

        row.map(|r| {
            let updated_at: String = r.try_get("updated_at")?;
            Ok(Preference {
                user_id,
                cooking_time_minutes: r.try_get("cooking_time_minutes")?,
                skill_level: r.try_get("skill_level")?,
                serving_size: r.try_get("serving_size")?,
                meal_prep: r.try_get("meal_prep")?,
                updated_at: parse_timestamp(&updated_at)?,
            })
        })
        .transpose()
    }

    /// Upsert the preference record for a user: create if absent, otherwise
    /// overwrite all four fields. The user-key primary key guarantees exactly
    /// one record per user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn upsert_preferences(
        &self,
        user_id: Uuid,
        update: &PreferenceUpdate,
    ) -> AppResult<Preference> {
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO preferences (user_id, cooking_time_minutes, skill_level, serving_size, meal_prep, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT(user_id) DO UPDATE SET
                cooking_time_minutes = excluded.cooking_time_minutes,
                skill_level = excluded.skill_level,
                serving_size = excluded.serving_size,
                meal_prep = excluded.meal_prep,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(update.cooking_time_minutes)
        .bind(&update.skill_level)
        .bind(update.serving_size)
        .bind(update.meal_prep)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert preferences: {e}")))?;

        Ok(Preference {
            user_id,
            cooking_time_minutes: update.cooking_time_minutes,
            skill_level: update.skill_level.clone(),
            serving_size: update.serving_size,
            meal_prep: update.meal_prep,
            updated_at: now,
        })
    }
}
