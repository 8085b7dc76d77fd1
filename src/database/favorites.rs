// ABOUTME: Favorites Toggle database operations
// ABOUTME: Idempotent add/remove of user-recipe favorite edges and summary listings

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::RecipeSummary;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// Direction of a favorites toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteAction {
    Add,
    Remove,
}

impl FavoriteAction {
    /// Parse from the two accepted request literals
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}

impl Database {
    /// Create the favorites edge table
    pub(super) async fn migrate_favorites(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Connect or disconnect a recipe from a user's favorites.
    ///
    /// Both directions are idempotent: adding an existing edge and removing
    /// an absent one are no-op successes.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the user or recipe does not exist, or
    /// a database error if the store fails.
    pub async fn set_favorite(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        action: FavoriteAction,
    ) -> AppResult<()> {
        self.get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

        if !self.recipe_exists(recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        match action {
            FavoriteAction::Add => {
                sqlx::query(
                    r"
                    INSERT OR IGNORE INTO favorites (user_id, recipe_id, created_at)
                    VALUES ($1, $2, $3)
                    ",
                )
                .bind(user_id.to_string())
                .bind(recipe_id.to_string())
                .bind(Utc::now().to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| AppError::database(format!("Failed to add favorite: {e}")))?;
            }
            FavoriteAction::Remove => {
                sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
                    .bind(user_id.to_string())
                    .bind(recipe_id.to_string())
                    .execute(self.pool())
                    .await
                    .map_err(|e| AppError::database(format!("Failed to remove favorite: {e}")))?;
            }
        }

        Ok(())
    }

    /// List a user's favorited recipes projected to summaries, most recently
    /// favorited first. Never returns the full recipe graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_favorites(&self, user_id: Uuid) -> AppResult<Vec<RecipeSummary>> {
        let rows = sqlx::query(
            r"
            SELECT r.id, r.title, r.description, r.image_url, r.cooking_time_minutes, r.difficulty
            FROM favorites f
            JOIN recipes r ON r.id = f.recipe_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list favorites: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                Ok(RecipeSummary {
                    id: super::allergies::parse_id(&id)?,
                    title: row.try_get("title")?,
                    description: row.try_get("description")?,
                    image_url: row.try_get("image_url")?,
                    cooking_time_minutes: row.try_get("cooking_time_minutes")?,
                    difficulty: row.try_get("difficulty")?,
                })
            })
            .collect()
    }

    /// List only the identifiers of a user's favorites, for cheap client-side
    /// membership checks. Returns an empty collection, never an error, when
    /// the user has no favorites or the identifier matches no user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_favorite_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let rows = sqlx::query("SELECT recipe_id FROM favorites WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list favorite ids: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("recipe_id")?;
                super::allergies::parse_id(&id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_literals() {
        assert_eq!(FavoriteAction::parse("add"), Some(FavoriteAction::Add));
        assert_eq!(FavoriteAction::parse("remove"), Some(FavoriteAction::Remove));
        assert_eq!(FavoriteAction::parse("toggle"), None);
        assert_eq!(FavoriteAction::parse("ADD"), None);
    }
}
