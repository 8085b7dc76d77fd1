// ABOUTME: Allergy Set Manager database operations
// ABOUTME: Replace-all allergy updates with transactional swap and canonical ingredient upsert

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Allergy, Ingredient, Severity};
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// Default category for ingredients auto-created during allergy writes
const DEFAULT_INGREDIENT_CATEGORY: &str = "other";

/// One submitted allergy entry. Ingredient names are free text; they are
/// canonicalized (trimmed, lowercased) and auto-created if unseen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllergyEntry {
    /// Free-text ingredient name
    pub ingredient_name: String,
    /// Severity of the allergy
    pub severity: Severity,
}

impl Database {
    /// Create ingredient and allergy tables
    pub(super) async fn migrate_allergies(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                category TEXT NOT NULL DEFAULT 'other'
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS allergies (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                ingredient_id TEXT NOT NULL REFERENCES ingredients(id),
                severity TEXT NOT NULL CHECK (severity IN ('mild', 'moderate', 'severe'))
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_allergies_user_id ON allergies(user_id)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// List a user's allergies joined with their canonical ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_allergies(&self, user_id: Uuid) -> AppResult<Vec<Allergy>> {
        let rows = sqlx::query(
            r"
            SELECT a.id, a.severity, i.id AS ingredient_id, i.name, i.category
            FROM allergies a
            JOIN ingredients i ON i.id = a.ingredient_id
            WHERE a.user_id = $1
            ORDER BY i.name ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list allergies: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let ingredient_id: String = row.try_get("ingredient_id")?;
                let severity: String = row.try_get("severity")?;
                Ok(Allergy {
                    id: parse_id(&id)?,
                    user_id,
                    ingredient: Ingredient {
                        id: parse_id(&ingredient_id)?,
                        name: row.try_get("name")?,
                        category: row.try_get("category")?,
                    },
                    severity: Severity::parse(&severity),
                })
            })
            .collect()
    }

    /// Replace a user's entire allergy set.
    ///
    /// Ingredient resolution fans out concurrently across entries (no
    /// ordering guarantee between entries); the swap itself runs inside one
    /// transaction, so a failed replacement leaves the prior set intact and
    /// readers never observe a transiently empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry has an empty ingredient name or any
    /// store operation fails; no partial replacement is committed.
    pub async fn replace_allergies(
        &self,
        user_id: Uuid,
        entries: &[AllergyEntry],
    ) -> AppResult<Vec<Allergy>> {
        // Canonicalize up front so a bad entry fails before any write
        let canonical: Vec<(String, Severity)> = entries
            .iter()
            .map(|entry| {
                let name = canonicalize_ingredient_name(&entry.ingredient_name);
                if name.is_empty() {
                    return Err(AppError::invalid_input("Ingredient name must not be empty"));
                }
                Ok((name, entry.severity))
            })
            .collect::<AppResult<_>>()?;

        let ingredients = try_join_all(
            canonical
                .iter()
                .map(|(name, _)| self.upsert_ingredient(name)),
        )
        .await?;

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM allergies WHERE user_id = $1")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear allergies: {e}")))?;

        let mut result = Vec::with_capacity(canonical.len());
        for ((_, severity), ingredient) in canonical.iter().zip(ingredients) {
            let allergy_id = Uuid::new_v4();
            sqlx::query(
                r"
                INSERT INTO allergies (id, user_id, ingredient_id, severity)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(allergy_id.to_string())
            .bind(user_id.to_string())
            .bind(ingredient.id.to_string())
            .bind(severity.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create allergy: {e}")))?;

            result.push(Allergy {
                id: allergy_id,
                user_id,
                ingredient,
                severity: *severity,
            });
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit allergy replacement: {e}")))?;

        Ok(result)
    }

    /// Upsert a canonical ingredient by its case-folded name, defaulting the
    /// category to "other" when newly created.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn upsert_ingredient(&self, canonical_name: &str) -> AppResult<Ingredient> {
        let row = sqlx::query(
            r"
            INSERT INTO ingredients (id, name, category)
            VALUES ($1, $2, $3)
            ON CONFLICT(name) DO UPDATE SET name = excluded.name
            RETURNING id, name, category
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(canonical_name)
        .bind(DEFAULT_INGREDIENT_CATEGORY)
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert ingredient: {e}")))?;

        let id: String = row.try_get("id")?;
        Ok(Ingredient {
            id: parse_id(&id)?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
        })
    }
}

/// Case-fold a free-text ingredient name to its canonical form
#[must_use]
pub fn canonicalize_ingredient_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub(super) fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::database(format!("Invalid id in store: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_ingredient_name() {
        assert_eq!(canonicalize_ingredient_name("  Peanuts "), "peanuts");
        assert_eq!(canonicalize_ingredient_name("SHELLFISH"), "shellfish");
        assert_eq!(canonicalize_ingredient_name("   "), "");
    }
}
