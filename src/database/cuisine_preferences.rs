// ABOUTME: Cuisine Preference Set Manager database operations
// ABOUTME: Replace-all cuisine preference updates with strict cuisine references

use super::allergies::parse_id;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{AffinityLevel, Cuisine, CuisinePreference};
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// One submitted cuisine preference entry. Unlike allergy ingredients,
/// cuisines are never auto-created: the referenced cuisine must already
/// exist, and an unknown id fails the whole replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuisinePreferenceEntry {
    /// Slug id of an existing cuisine
    pub cuisine_id: String,
    /// Affinity level
    pub level: AffinityLevel,
}

impl Database {
    /// Create cuisine and cuisine preference tables
    pub(super) async fn migrate_cuisine_preferences(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cuisines (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cuisine_preferences (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                cuisine_id TEXT NOT NULL REFERENCES cuisines(id),
                level TEXT NOT NULL CHECK (level IN ('love', 'like', 'neutral', 'dislike'))
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_cuisine_preferences_user_id ON cuisine_preferences(user_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Create a cuisine record
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn create_cuisine(&self, cuisine: &Cuisine) -> AppResult<()> {
        sqlx::query("INSERT INTO cuisines (id, name) VALUES ($1, $2)")
            .bind(&cuisine.id)
            .bind(&cuisine.name)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to create cuisine: {e}")))?;

        Ok(())
    }

    /// Get a cuisine by its slug id
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn get_cuisine(&self, cuisine_id: &str) -> AppResult<Option<Cuisine>> {
        let row = sqlx::query("SELECT id, name FROM cuisines WHERE id = $1")
            .bind(cuisine_id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get cuisine: {e}")))?;

        row.map(|r| {
            Ok(Cuisine {
                id: r.try_get("id")?,
                name: r.try_get("name")?,
            })
        })
        .transpose()
    }

    /// List a user's cuisine preferences joined with their cuisines
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_cuisine_preferences(&self, user_id: Uuid) -> AppResult<Vec<CuisinePreference>> {
        let rows = sqlx::query(
            r"
            SELECT p.id, p.level, c.id AS cuisine_id, c.name
            FROM cuisine_preferences p
            JOIN cuisines c ON c.id = p.cuisine_id
            WHERE p.user_id = $1
            ORDER BY c.name ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list cuisine preferences: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let level: String = row.try_get("level")?;
                Ok(CuisinePreference {
                    id: parse_id(&id)?,
                    user_id,
                    cuisine: Cuisine {
                        id: row.try_get("cuisine_id")?,
                        name: row.try_get("name")?,
                    },
                    level: AffinityLevel::parse(&level),
                })
            })
            .collect()
    }

    /// Replace a user's entire cuisine preference set.
    ///
    /// Every referenced cuisine must already exist; resolution fans out
    /// concurrently and an unknown id fails the whole call with an error
    /// naming the offending id, before any row is deleted or created. The
    /// swap itself runs inside one transaction.
    ///
    /// # Errors
    ///
    /// Returns a reference error naming the first unknown cuisine id, or a
    /// database error if any store operation fails.
    pub async fn replace_cuisine_preferences(
        &self,
        user_id: Uuid,
        entries: &[CuisinePreferenceEntry],
    ) -> AppResult<Vec<CuisinePreference>> {
        let cuisines = try_join_all(entries.iter().map(|entry| async {
            self.get_cuisine(&entry.cuisine_id).await?.ok_or_else(|| {
                AppError::reference_not_found(format!(
                    "Cuisine with ID {} not found",
                    entry.cuisine_id
                ))
            })
        }))
        .await?;

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM cuisine_preferences WHERE user_id = $1")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear cuisine preferences: {e}")))?;

        let mut result = Vec::with_capacity(entries.len());
        for (entry, cuisine) in entries.iter().zip(cuisines) {
            let preference_id = Uuid::new_v4();
            sqlx::query(
                r"
                INSERT INTO cuisine_preferences (id, user_id, cuisine_id, level)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(preference_id.to_string())
            .bind(user_id.to_string())
            .bind(&cuisine.id)
            .bind(entry.level.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create cuisine preference: {e}")))?;

            result.push(CuisinePreference {
                id: preference_id,
                user_id,
                cuisine,
                level: entry.level,
            });
        }

        tx.commit().await.map_err(|e| {
            AppError::database(format!("Failed to commit cuisine preference replacement: {e}"))
        })?;

        Ok(result)
    }
}
