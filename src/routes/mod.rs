// ABOUTME: Route module organization for the Ladle HTTP API
// ABOUTME: Domain route definitions with thin handlers delegating to the database layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route modules.
//!
//! Each domain module exposes a `*Routes` struct whose `routes()` builds an
//! axum router over shared [`crate::server::ServerResources`]. Handlers stay
//! thin: authenticate first, then delegate to the database layer.

/// Allergy set routes
pub mod allergies;
/// Cuisine preference set routes
pub mod cuisine_preferences;
/// Favorites toggle and listing routes
pub mod favorites;
/// Dietary feedback and recipe report routes
pub mod feedback;
/// Health check and readiness routes
pub mod health;
/// Cooking preference routes
pub mod preferences;
/// Search suggestion routes
pub mod search;

pub use allergies::AllergyRoutes;
pub use cuisine_preferences::CuisinePreferenceRoutes;
pub use favorites::FavoriteRoutes;
pub use feedback::FeedbackRoutes;
pub use health::HealthRoutes;
pub use preferences::PreferenceRoutes;
pub use search::SearchRoutes;

use crate::errors::{AppError, AppResult};
use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Deserialize a JSON request body into the given wire type.
///
/// Body-carrying handlers take the raw [`Bytes`] and call this only after the
/// session guard has accepted the request, so unauthenticated callers always
/// get 401 regardless of body shape. Deserialization failures map to the API
/// error envelope instead of axum's plain-text rejection.
pub fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> AppResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))
}
