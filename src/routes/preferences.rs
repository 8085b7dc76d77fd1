// ABOUTME: Route handlers for the cooking preference REST API
// ABOUTME: Reads and replaces the single preference record of the authenticated user
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::database::PreferenceUpdate;
use crate::errors::AppError;
use crate::models::Preference;
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

/// Wire shape of a preference record
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceResponse {
    /// Preferred maximum cooking time in minutes
    pub cooking_time: i64,
    /// Self-reported skill level
    pub skill_level: String,
    /// Default serving size
    pub serving_size: i64,
    /// Whether the user meal-preps
    pub meal_prep: bool,
    /// Last update timestamp
    pub updated_at: String,
}

impl From<Preference> for PreferenceResponse {
    fn from(preference: Preference) -> Self {
        Self {
            cooking_time: preference.cooking_time_minutes,
            skill_level: preference.skill_level,
            serving_size: preference.serving_size,
            meal_prep: preference.meal_prep,
            updated_at: preference.updated_at.to_rfc3339(),
        }
    }
}

/// Request body replacing all preference fields
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutPreferencesBody {
    /// Preferred maximum cooking time in minutes
    pub cooking_time: i64,
    /// Self-reported skill level
    pub skill_level: String,
    /// Default serving size
    pub serving_size: i64,
    /// Whether the user meal-preps
    pub meal_prep: bool,
}

/// Preference routes implementation
pub struct PreferenceRoutes;

impl PreferenceRoutes {
    /// Create all preference routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/preferences", get(Self::handle_get))
            .route("/api/preferences", put(Self::handle_put))
            .with_state(resources)
    }

    /// Handle GET /api/preferences - current user's preference record or null
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.session_guard.authenticate(&headers).await?;

        let preference = resources.database.get_preferences(auth.user_id).await?;
        let response: Option<PreferenceResponse> = preference.map(Into::into);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/preferences - upsert all preference fields at once
    async fn handle_put(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = resources.session_guard.authenticate(&headers).await?;

        let body: PutPreferencesBody = parse_json_body(&body)?;
        let update = PreferenceUpdate {
            cooking_time_minutes: body.cooking_time,
            skill_level: body.skill_level,
            serving_size: body.serving_size,
            meal_prep: body.meal_prep,
        };
        let preference = resources
            .database
            .upsert_preferences(auth.user_id, &update)
            .await?;

        let response: PreferenceResponse = preference.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
