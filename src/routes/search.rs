// ABOUTME: Route handlers for recipe search suggestions
// ABOUTME: Bounded case-insensitive title lookup for typeahead clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::AppError;
use crate::models::RecipeSuggestion;
use crate::server::ServerResources;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for suggestion lookup
#[derive(Debug, Deserialize, Default)]
pub struct SuggestionsQuery {
    /// Title substring to match, case-insensitive
    pub query: Option<String>,
}

/// Wire shape of one suggestion
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
}

impl From<RecipeSuggestion> for SuggestionResponse {
    fn from(suggestion: RecipeSuggestion) -> Self {
        Self {
            id: suggestion.id.to_string(),
            title: suggestion.title,
        }
    }
}

/// Search routes implementation
pub struct SearchRoutes;

impl SearchRoutes {
    /// Create all search routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/search/suggestions", get(Self::handle_suggestions))
            .with_state(resources)
    }

    /// Handle GET /api/search/suggestions?query= - up to 7 title matches,
    /// alphabetical. Blank queries short-circuit to an empty list.
    async fn handle_suggestions(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<SuggestionsQuery>,
    ) -> Result<Response, AppError> {
        resources.session_guard.authenticate(&headers).await?;

        let query = params.query.unwrap_or_default();
        let suggestions = resources.database.search_suggestions(&query).await?;
        let response: Vec<SuggestionResponse> = suggestions.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
