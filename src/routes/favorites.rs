// ABOUTME: Route handlers for the favorites REST API
// ABOUTME: Idempotent favorite toggling plus summary and id listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::database::FavoriteAction;
use crate::errors::AppError;
use crate::models::RecipeSummary;
use crate::routes::parse_json_body;
use crate::server::ServerResources;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Wire shape of a favorited recipe summary
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecipeResponse {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional image URL
    pub image: Option<String>,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Difficulty label
    pub difficulty: String,
}

impl From<RecipeSummary> for FavoriteRecipeResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            description: summary.description,
            image: summary.image_url,
            cooking_time: summary.cooking_time_minutes,
            difficulty: summary.difficulty,
        }
    }
}

/// Request body toggling a favorite. Fields are optional so missing ones can
/// be reported as bad requests rather than body rejections.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteBody {
    /// Target recipe id
    pub recipe_id: Option<Uuid>,
    /// Action literal, "add" or "remove"
    pub action: Option<String>,
}

/// Success envelope for toggle responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleFavoriteResponse {
    /// Always true on success
    pub success: bool,
}

/// Favorite routes implementation
pub struct FavoriteRoutes;

impl FavoriteRoutes {
    /// Create all favorite routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/favorites", get(Self::handle_list))
            .route("/api/recipes/favorites", post(Self::handle_toggle))
            .route(
                "/api/user/preferences/favourites/ids",
                get(Self::handle_list_ids),
            )
            .with_state(resources)
    }

    /// Handle GET /api/recipes/favorites - list favorited recipe summaries
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.session_guard.authenticate(&headers).await?;

        let favorites = resources.database.list_favorites(auth.user_id).await?;
        let response: Vec<FavoriteRecipeResponse> = favorites.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recipes/favorites - idempotently add or remove
    async fn handle_toggle(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = resources.session_guard.authenticate(&headers).await?;

        let body: ToggleFavoriteBody = parse_json_body(&body)?;
        let recipe_id = body
            .recipe_id
            .ok_or_else(|| AppError::missing_field("recipeId"))?;
        let action = body
            .action
            .as_deref()
            .and_then(FavoriteAction::parse)
            .ok_or_else(|| AppError::invalid_input("action must be \"add\" or \"remove\""))?;

        resources
            .database
            .set_favorite(auth.user_id, recipe_id, action)
            .await?;
        Ok((StatusCode::OK, Json(ToggleFavoriteResponse { success: true })).into_response())
    }

    /// Handle GET /api/user/preferences/favourites/ids - ids only, for cheap
    /// client membership checks. Always 200 with an array.
    async fn handle_list_ids(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.session_guard.authenticate(&headers).await?;

        let ids = resources.database.list_favorite_ids(auth.user_id).await?;
        let response: Vec<String> = ids.into_iter().map(|id| id.to_string()).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
