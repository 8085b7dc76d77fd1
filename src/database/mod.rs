// ABOUTME: Database management for the Ladle recipe-discovery store
// ABOUTME: Owns the sqlite pool, startup migrations, and per-domain operation modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! Single consistent sqlite store behind all user data. Each domain module
//! extends [`Database`] with its operations and its `migrate_*` DDL; every
//! read is a fresh query, and the only multi-statement writes (the
//! replace-all updates for allergies and cuisine preferences) run inside one
//! transaction so no transiently-empty set is ever externally visible.

mod allergies;
mod cuisine_preferences;
mod favorites;
mod feedback;
mod preferences;
mod recipes;
mod users;

pub use allergies::AllergyEntry;
pub use cuisine_preferences::CuisinePreferenceEntry;
pub use favorites::FavoriteAction;
pub use feedback::{DietaryFeedbackSubmission, FeedbackOutcome, REVIEW_THRESHOLD};
pub use preferences::PreferenceUpdate;
pub use recipes::{NewRecipe, MAX_SUGGESTIONS};

use crate::errors::AppResult;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for all persistent state
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") && !database_url.contains(":memory:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&self.pool)
            .await?;

        self.migrate_users().await?;
        self.migrate_preferences().await?;
        self.migrate_allergies().await?;
        self.migrate_cuisine_preferences().await?;
        self.migrate_recipes().await?;
        self.migrate_favorites().await?;
        self.migrate_feedback().await?;

        Ok(())
    }
}
