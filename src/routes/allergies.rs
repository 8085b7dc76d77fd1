// ABOUTME: Route handlers for the allergy set REST API
// ABOUTME: Lists and atomically replaces the authenticated user's allergy list
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::database::AllergyEntry;
use crate::errors::AppError;
use crate::models::{Allergy, Severity};
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

/// Wire shape of one allergy joined with its canonical ingredient
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergyResponse {
    /// Unique identifier
    pub id: String,
    /// Canonical ingredient
    pub ingredient: IngredientResponse,
    /// Allergy severity
    pub severity: Severity,
}

/// Wire shape of a canonical ingredient
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientResponse {
    /// Unique identifier
    pub id: String,
    /// Canonical lowercase name
    pub name: String,
    /// Ingredient category
    pub category: String,
}

impl From<Allergy> for AllergyResponse {
    fn from(allergy: Allergy) -> Self {
        Self {
            id: allergy.id.to_string(),
            ingredient: IngredientResponse {
                id: allergy.ingredient.id.to_string(),
                name: allergy.ingredient.name,
                category: allergy.ingredient.category,
            },
            severity: allergy.severity,
        }
    }
}

/// One submitted allergy entry. Ingredient is free text and is resolved to a
/// canonical record, auto-created when unseen. Severity literals outside
/// mild/moderate/severe reject the whole request.
#[derive(Debug, Deserialize)]
pub struct AllergyEntryBody {
    /// Free-text ingredient name
    pub ingredient: String,
    /// Allergy severity
    pub severity: Severity,
}

/// Request body replacing the entire allergy set
#[derive(Debug, Deserialize)]
pub struct PutAllergiesBody {
    /// Complete new allergy list
    pub allergies: Vec<AllergyEntryBody>,
}

/// Allergy routes implementation
pub struct AllergyRoutes;

impl AllergyRoutes {
    /// Create all allergy routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/allergies", get(Self::handle_get))
            .route("/api/allergies", put(Self::handle_put))
            .with_state(resources)
    }

    /// Handle GET /api/allergies - list allergies joined with ingredients
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.session_guard.authenticate(&headers).await?;

        let allergies = resources.database.list_allergies(auth.user_id).await?;
        let response: Vec<AllergyResponse> = allergies.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/allergies - replace the entire allergy set
    async fn handle_put(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = resources.session_guard.authenticate(&headers).await?;

        let body: PutAllergiesBody = parse_json_body(&body)?;
        let entries: Vec<AllergyEntry> = body
            .allergies
            .into_iter()
            .map(|entry| AllergyEntry {
                ingredient_name: entry.ingredient,
                severity: entry.severity,
            })
            .collect();

        let allergies = resources
            .database
            .replace_allergies(auth.user_id, &entries)
            .await?;
        let response: Vec<AllergyResponse> = allergies.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
