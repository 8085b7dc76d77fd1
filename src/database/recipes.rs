// ABOUTME: Recipe storage and the Search Suggestion Provider
// ABOUTME: Read-mostly recipe lookups, instruction ordering, and bounded title search

use super::allergies::parse_id;
use super::users::parse_timestamp;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Instruction, Recipe, RecipeSuggestion};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// Maximum number of search suggestions returned per query
pub const MAX_SUGGESTIONS: i64 = 7;

/// Fields required to create a recipe. Recipe authoring is not part of the
/// preference layer's surface; this exists for seeding and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Display title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Cooking time in minutes
    pub cooking_time_minutes: i64,
    /// Difficulty label
    pub difficulty: String,
    /// Recipe author
    pub author_id: Option<Uuid>,
    /// Vegetarian classification
    pub vegetarian: bool,
    /// Vegan classification
    pub vegan: bool,
    /// Gluten-free classification
    pub gluten_free: bool,
    /// Low-FODMAP classification
    pub low_fodmap: bool,
    /// Fermented classification
    pub fermented: bool,
    /// Pescatarian classification
    pub pescatarian: bool,
    /// Instruction steps in order
    pub instructions: Vec<String>,
}

impl Database {
    /// Create recipe, recipe-ingredient, and instruction tables
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                image_url TEXT,
                cooking_time_minutes INTEGER NOT NULL DEFAULT 0,
                difficulty TEXT NOT NULL DEFAULT 'easy',
                author_id TEXT REFERENCES users(id),
                vegetarian BOOLEAN NOT NULL DEFAULT 0,
                vegan BOOLEAN NOT NULL DEFAULT 0,
                gluten_free BOOLEAN NOT NULL DEFAULT 0,
                low_fodmap BOOLEAN NOT NULL DEFAULT 0,
                fermented BOOLEAN NOT NULL DEFAULT 0,
                pescatarian BOOLEAN NOT NULL DEFAULT 0,
                needs_review BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id TEXT NOT NULL REFERENCES ingredients(id),
                quantity TEXT,
                position INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (recipe_id, ingredient_id)
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS instructions (
                id TEXT PRIMARY KEY,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                step_number INTEGER NOT NULL,
                text TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_title ON recipes(title)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Create a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn create_recipe(&self, recipe: &NewRecipe) -> AppResult<Recipe> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO recipes (
                id, title, description, image_url, cooking_time_minutes, difficulty,
                author_id, vegetarian, vegan, gluten_free, low_fodmap, fermented,
                pescatarian, needs_review, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(id.to_string())
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&recipe.image_url)
        .bind(recipe.cooking_time_minutes)
        .bind(&recipe.difficulty)
        .bind(recipe.author_id.map(|a| a.to_string()))
        .bind(recipe.vegetarian)
        .bind(recipe.vegan)
        .bind(recipe.gluten_free)
        .bind(recipe.low_fodmap)
        .bind(recipe.fermented)
        .bind(recipe.pescatarian)
        .bind(false)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        for (index, text) in recipe.instructions.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO instructions (id, recipe_id, step_number, text)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(id.to_string())
            .bind(i64::try_from(index + 1).unwrap_or(i64::MAX))
            .bind(text)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to create instruction: {e}")))?;
        }

        Ok(Recipe {
            id,
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            image_url: recipe.image_url.clone(),
            cooking_time_minutes: recipe.cooking_time_minutes,
            difficulty: recipe.difficulty.clone(),
            author_id: recipe.author_id,
            vegetarian: recipe.vegetarian,
            vegan: recipe.vegan,
            gluten_free: recipe.gluten_free,
            low_fodmap: recipe.low_fodmap,
            fermented: recipe.fermented,
            pescatarian: recipe.pescatarian,
            needs_review: false,
            created_at: now,
        })
    }

    /// Get a recipe by id
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn get_recipe(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, image_url, cooking_time_minutes, difficulty,
                   author_id, vegetarian, vegan, gluten_free, low_fodmap, fermented,
                   pescatarian, needs_review, created_at
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    /// Cheap existence check used by the favorites and feedback paths
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn recipe_exists(&self, recipe_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM recipes WHERE id = $1")
            .bind(recipe_id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to check recipe: {e}")))?;

        Ok(row.is_some())
    }

    /// List a recipe's instructions ordered by step number
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_instructions(&self, recipe_id: Uuid) -> AppResult<Vec<Instruction>> {
        let rows = sqlx::query(
            r"
            SELECT id, step_number, text
            FROM instructions
            WHERE recipe_id = $1
            ORDER BY step_number ASC
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list instructions: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                Ok(Instruction {
                    id: parse_id(&id)?,
                    recipe_id,
                    step_number: row.try_get("step_number")?,
                    text: row.try_get("text")?,
                })
            })
            .collect()
    }

    /// Bounded, case-insensitive substring lookup over recipe titles.
    ///
    /// An empty or whitespace-only query short-circuits to an empty list
    /// without touching the store. Results are ordered alphabetically by
    /// title and capped at [`MAX_SUGGESTIONS`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn search_suggestions(&self, query: &str) -> AppResult<Vec<RecipeSuggestion>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", escape_like_pattern(trimmed));
        let rows = sqlx::query(
            r"
            SELECT id, title
            FROM recipes
            WHERE title LIKE $1 ESCAPE '\'
            ORDER BY title ASC
            LIMIT $2
            ",
        )
        .bind(&pattern)
        .bind(MAX_SUGGESTIONS)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to search recipes: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                Ok(RecipeSuggestion {
                    id: parse_id(&id)?,
                    title: row.try_get("title")?,
                })
            })
            .collect()
    }

    /// Flag a recipe for manual review
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub(super) async fn mark_needs_review(&self, recipe_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE recipes SET needs_review = 1 WHERE id = $1")
            .bind(recipe_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to flag recipe for review: {e}")))?;

        Ok(())
    }
}

/// Escape LIKE wildcards in user-supplied query text
fn escape_like_pattern(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn row_to_recipe(row: &sqlx::sqlite::SqliteRow) -> AppResult<Recipe> {
    let id: String = row.try_get("id")?;
    let author_id: Option<String> = row.try_get("author_id")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Recipe {
        id: parse_id(&id)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        cooking_time_minutes: row.try_get("cooking_time_minutes")?,
        difficulty: row.try_get("difficulty")?,
        author_id: author_id.as_deref().map(parse_id).transpose()?,
        vegetarian: row.try_get("vegetarian")?,
        vegan: row.try_get("vegan")?,
        gluten_free: row.try_get("gluten_free")?,
        low_fodmap: row.try_get("low_fodmap")?,
        fermented: row.try_get("fermented")?,
        pescatarian: row.try_get("pescatarian")?,
        needs_review: row.try_get("needs_review")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("rice"), "rice");
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("a_b"), "a\\_b");
    }
}
