// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, session, and seed-data helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code, missing_docs, clippy::unwrap_used)]

use anyhow::Result;
use ladle::{
    auth::SessionManager,
    config::environment::{CorsConfig, DatabaseConfig, ServerConfig},
    config::{DatabaseUrl, Environment, LogLevel},
    database::{Database, NewRecipe},
    models::{Cuisine, Recipe, User},
    server::ServerResources,
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Configuration suitable for in-process route tests
pub fn create_test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        log_level: LogLevel::default(),
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        cors: CorsConfig {
            allowed_origins: "*".to_owned(),
        },
        session_expiry_hours: 24,
        email: None,
    }
}

/// Full server resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<(Arc<ServerResources>, Arc<Database>)> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let resources = Arc::new(ServerResources::new(database, create_test_config()));
    Ok((resources.clone(), resources.database.clone()))
}

/// Create a user with a unique email
pub async fn seed_user(database: &Database) -> Result<User> {
    let user = User::new(format!("{}@example.com", Uuid::new_v4()), None);
    database.create_user(&user).await?;
    Ok(user)
}

/// Issue a session for a user, returning the plaintext token
pub async fn seed_session(database: &Arc<Database>, user_id: Uuid) -> Result<String> {
    let manager = SessionManager::new(database.clone(), 24);
    let token = manager.issue_session(user_id).await?;
    Ok(token)
}

/// Create a recipe with the given title and default classifications
pub async fn seed_recipe(database: &Database, title: &str) -> Result<Recipe> {
    let recipe = database
        .create_recipe(&NewRecipe {
            title: title.to_owned(),
            description: Some(format!("{title} description")),
            image_url: None,
            cooking_time_minutes: 30,
            difficulty: "easy".to_owned(),
            author_id: None,
            vegetarian: false,
            vegan: false,
            gluten_free: false,
            low_fodmap: false,
            fermented: false,
            pescatarian: false,
            instructions: Vec::new(),
        })
        .await?;
    Ok(recipe)
}

/// Create a cuisine with the given slug id
pub async fn seed_cuisine(database: &Database, id: &str, name: &str) -> Result<Cuisine> {
    let cuisine = Cuisine {
        id: id.to_owned(),
        name: name.to_owned(),
    };
    database.create_cuisine(&cuisine).await?;
    Ok(cuisine)
}
