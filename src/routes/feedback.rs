// ABOUTME: Route handlers for dietary feedback and recipe reports
// ABOUTME: Appends classification disputes and forwards user reports by email
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::database::DietaryFeedbackSubmission;
use crate::errors::AppError;
use crate::external::RecipeReport;
use crate::routes::parse_json_body;
use crate::server::ServerResources;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Submitted dietary feedback payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackBody {
    /// Whether the low-FODMAP classification is disputed
    #[serde(default)]
    pub low_fodmap: bool,
    /// Whether the fermented classification is disputed
    #[serde(default)]
    pub fermented: bool,
    /// Whether the pescatarian classification is disputed
    #[serde(default)]
    pub pescatarian: bool,
    /// Free-text comment
    pub comment: Option<String>,
    /// Snapshot of the analysis being disputed
    #[serde(default)]
    pub current_analysis: serde_json::Value,
}

/// Request body for POST /api/recipes/feedback
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackBody {
    /// Disputed recipe
    pub recipe_id: Option<Uuid>,
    /// Feedback payload
    pub feedback: FeedbackBody,
}

/// Success envelope carrying the new feedback record id
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackResponse {
    /// Always true on success
    pub success: bool,
    /// Identifier of the appended feedback record
    pub feedback_id: String,
}

/// Request body for POST /api/recipes/report
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecipeBody {
    /// Reported recipe
    pub recipe_id: Option<Uuid>,
    /// Recipe title as the reporter saw it
    pub recipe_title: Option<String>,
    /// Reporter's name
    pub name: Option<String>,
    /// Reporter's email address
    pub email: Option<String>,
    /// Free-text report message
    pub message: Option<String>,
}

/// Success envelope for report dispatch
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportRecipeResponse {
    /// Always true on success
    pub success: bool,
}

/// Feedback routes implementation
pub struct FeedbackRoutes;

impl FeedbackRoutes {
    /// Create all feedback routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/feedback", post(Self::handle_submit))
            .route("/api/recipes/report", post(Self::handle_report))
            .with_state(resources)
    }

    /// Handle POST /api/recipes/feedback - append one classification dispute
    async fn handle_submit(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        resources.session_guard.authenticate(&headers).await?;

        let body: SubmitFeedbackBody = parse_json_body(&body)?;
        let recipe_id = body
            .recipe_id
            .ok_or_else(|| AppError::missing_field("recipeId"))?;

        let submission = DietaryFeedbackSubmission {
            low_fodmap_incorrect: body.feedback.low_fodmap,
            fermented_incorrect: body.feedback.fermented,
            pescatarian_incorrect: body.feedback.pescatarian,
            comment: body.feedback.comment,
            current_analysis: body.feedback.current_analysis,
        };
        let outcome = resources
            .database
            .submit_dietary_feedback(recipe_id, &submission)
            .await?;

        let response = SubmitFeedbackResponse {
            success: true,
            feedback_id: outcome.feedback_id.to_string(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recipes/report - forward a user report by email
    async fn handle_report(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        resources.session_guard.authenticate(&headers).await?;

        let body: ReportRecipeBody = parse_json_body(&body)?;
        let report = RecipeReport {
            recipe_id: body
                .recipe_id
                .ok_or_else(|| AppError::missing_field("recipeId"))?,
            recipe_title: body
                .recipe_title
                .ok_or_else(|| AppError::missing_field("recipeTitle"))?,
            name: body.name.unwrap_or_default(),
            email: body.email.unwrap_or_default(),
            message: body
                .message
                .ok_or_else(|| AppError::missing_field("message"))?,
        };

        resources.mailer.send_recipe_report(&report).await?;
        Ok((StatusCode::OK, Json(ReportRecipeResponse { success: true })).into_response())
    }
}
