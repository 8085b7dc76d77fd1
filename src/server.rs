// ABOUTME: HTTP server assembly for the Ladle API
// ABOUTME: Builds shared resources, composes domain routers, and serves them over TCP

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server assembly.
//!
//! [`ServerResources`] bundles every shared dependency once at startup;
//! route modules receive it as an `Arc` and never construct their own
//! connections or clients.

use crate::auth::SessionManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::external::{HttpMailer, Mailer, NoopMailer};
use crate::middleware::{setup_cors, SessionGuard};
use crate::routes::{
    AllergyRoutes, CuisinePreferenceRoutes, FavoriteRoutes, FeedbackRoutes, HealthRoutes,
    PreferenceRoutes, SearchRoutes,
};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared dependencies handed to every route handler
pub struct ServerResources {
    /// Backing store
    pub database: Arc<Database>,
    /// Request identity guard
    pub session_guard: SessionGuard,
    /// Outbound email collaborator
    pub mailer: Arc<dyn Mailer>,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Assemble resources from configuration and an initialized database
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let database = Arc::new(database);
        let session_manager =
            SessionManager::new(database.clone(), config.session_expiry_hours);
        let mailer: Arc<dyn Mailer> = match &config.email {
            Some(email) => Arc::new(HttpMailer::new(email.clone())),
            None => Arc::new(NoopMailer),
        };

        Self {
            database,
            session_guard: SessionGuard::new(session_manager),
            mailer,
            config,
        }
    }
}

/// Build the full API router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(PreferenceRoutes::routes(resources.clone()))
        .merge(AllergyRoutes::routes(resources.clone()))
        .merge(CuisinePreferenceRoutes::routes(resources.clone()))
        .merge(FavoriteRoutes::routes(resources.clone()))
        .merge(SearchRoutes::routes(resources.clone()))
        .merge(FeedbackRoutes::routes(resources.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors(&resources.config))
}

/// Bind and serve the API until the process is stopped
///
/// # Errors
///
/// Returns an error if binding the port or serving fails.
pub async fn serve(resources: Arc<ServerResources>) -> AppResult<()> {
    let port = resources.config.http_port;
    let app = router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| crate::errors::AppError::config(format!("Failed to bind port {port}: {e}")))?;

    tracing::info!("ladle server listening on port {port}");
    axum::serve(listener, app)
        .await
        .map_err(|e| crate::errors::AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}
