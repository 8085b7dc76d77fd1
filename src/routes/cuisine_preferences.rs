// ABOUTME: Route handlers for the cuisine preference set REST API
// ABOUTME: Lists and atomically replaces the authenticated user's cuisine affinities
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::database::CuisinePreferenceEntry;
use crate::errors::AppError;
use crate::models::{AffinityLevel, CuisinePreference};
use crate::routes::parse_json_body;
use crate::server::ServerResources;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Wire shape of one cuisine preference joined with its cuisine
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuisinePreferenceResponse {
    /// Unique identifier
    pub id: String,
    /// Referenced cuisine id
    pub cuisine_id: String,
    /// Cuisine display name
    pub cuisine_name: String,
    /// Affinity level
    pub level: AffinityLevel,
}

impl From<CuisinePreference> for CuisinePreferenceResponse {
    fn from(preference: CuisinePreference) -> Self {
        Self {
            id: preference.id.to_string(),
            cuisine_id: preference.cuisine.id,
            cuisine_name: preference.cuisine.name,
            level: preference.level,
        }
    }
}

/// One submitted cuisine preference. The cuisine must already exist;
/// unknown ids fail the whole replacement, unlike the allergy set's
/// ingredient auto-create. Level literals outside love/like/neutral/dislike
/// reject the whole request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuisinePreferenceEntryBody {
    /// Referenced cuisine id
    pub cuisine_id: String,
    /// Affinity level
    pub level: AffinityLevel,
}

/// Request body replacing the entire cuisine preference set
#[derive(Debug, Deserialize)]
pub struct PutCuisinePreferencesBody {
    /// Complete new preference list
    pub preferences: Vec<CuisinePreferenceEntryBody>,
}

/// Cuisine preference routes implementation
pub struct CuisinePreferenceRoutes;

impl CuisinePreferenceRoutes {
    /// Create all cuisine preference routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/cuisine-preferences", get(Self::handle_get))
            .route("/api/cuisine-preferences", put(Self::handle_put))
            .with_state(resources)
    }

    /// Handle GET /api/cuisine-preferences - list preferences with cuisines
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.session_guard.authenticate(&headers).await?;

        let preferences = resources
            .database
            .list_cuisine_preferences(auth.user_id)
            .await?;
        let response: Vec<CuisinePreferenceResponse> =
            preferences.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/cuisine-preferences - replace the entire set
    async fn handle_put(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = resources.session_guard.authenticate(&headers).await?;

        let body: PutCuisinePreferencesBody = parse_json_body(&body)?;
        let entries: Vec<CuisinePreferenceEntry> = body
            .preferences
            .into_iter()
            .map(|entry| CuisinePreferenceEntry {
                cuisine_id: entry.cuisine_id,
                level: entry.level,
            })
            .collect();

        let preferences = resources
            .database
            .replace_cuisine_preferences(auth.user_id, &entries)
            .await?;
        let response: Vec<CuisinePreferenceResponse> =
            preferences.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
