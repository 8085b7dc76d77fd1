// ABOUTME: Core domain models for users, recipes, preferences, and dietary data
// ABOUTME: Defines the shared types exchanged between routes and the database layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain models shared across the route and database layers.
//!
//! Wire-facing request/response shapes live next to their routes; the types
//! here are the canonical internal representations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. The surrogate `id` is the canonical user key for every
/// operation; `email` is retained as a unique lookup key only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Email address (unique)
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Whether the account is active
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a fresh id
    #[must_use]
    pub fn new(email: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            is_active: true,
            created_at: now,
            last_active: now,
        }
    }
}

/// Allergy severity scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "moderate" => Self::Moderate,
            "severe" => Self::Severe,
            _ => Self::Mild,
        }
    }
}

/// Four-level cuisine affinity scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffinityLevel {
    Love,
    Like,
    Neutral,
    Dislike,
}

impl AffinityLevel {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Like => "like",
            Self::Neutral => "neutral",
            Self::Dislike => "dislike",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "love" => Self::Love,
            "like" => Self::Like,
            "dislike" => Self::Dislike,
            _ => Self::Neutral,
        }
    }
}

/// Per-user cooking preferences. Exactly one record exists per user; updates
/// overwrite all four fields (partial updates are not supported).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preference {
    /// Owning user
    pub user_id: Uuid,
    /// Preferred maximum cooking time in minutes
    pub cooking_time_minutes: i64,
    /// Self-reported skill level
    pub skill_level: String,
    /// Default serving size
    pub serving_size: i64,
    /// Whether the user meal-preps
    pub meal_prep: bool,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Canonical ingredient record, shared across users' allergy entries.
/// Names are lowercase-trimmed; unseen names are auto-created with
/// category "other".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: Uuid,
    /// Canonical lowercase name (unique)
    pub name: String,
    /// Ingredient category
    pub category: String,
}

/// A user allergy, always returned joined with its canonical ingredient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allergy {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Resolved canonical ingredient
    pub ingredient: Ingredient,
    /// Severity of the allergy
    pub severity: Severity,
}

/// A cuisine users can express preferences for. Cuisine ids are short
/// free-form slugs, not UUIDs, and must pre-exist before being referenced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cuisine {
    /// Slug identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// A user's affinity for one cuisine, joined with the cuisine record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuisinePreference {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Referenced cuisine
    pub cuisine: Cuisine,
    /// Affinity level
    pub level: AffinityLevel,
}

/// A recipe with its scalar classification flags. Mutation of recipe content
/// is out of scope; recipes are the read-mostly target of favorites,
/// feedback, and recently-viewed tracking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Cooking time in minutes
    pub cooking_time_minutes: i64,
    /// Difficulty label
    pub difficulty: String,
    /// Recipe author
    pub author_id: Option<Uuid>,
    /// Vegetarian classification
    pub vegetarian: bool,
    /// Vegan classification
    pub vegan: bool,
    /// Gluten-free classification
    pub gluten_free: bool,
    /// Low-FODMAP classification
    pub low_fodmap: bool,
    /// Fermented classification
    pub fermented: bool,
    /// Pescatarian classification
    pub pescatarian: bool,
    /// Moderation flag set when dietary feedback reports cross the threshold
    pub needs_review: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Summary projection of a recipe for list views. Never carries the full
/// recipe graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Cooking time in minutes
    pub cooking_time_minutes: i64,
    /// Difficulty label
    pub difficulty: String,
}

/// Minimal projection for search suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
}

/// An ordered instruction step belonging to a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    /// Unique identifier
    pub id: Uuid,
    /// Owning recipe
    pub recipe_id: Uuid,
    /// Position in the instruction sequence, starting at 1
    pub step_number: i64,
    /// Instruction text
    pub text: String,
}

/// One append-only dietary classification dispute. Created on submission,
/// never mutated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietaryFeedback {
    /// Unique identifier
    pub id: Uuid,
    /// Disputed recipe
    pub recipe_id: Uuid,
    /// Whether the low-FODMAP classification is disputed
    pub low_fodmap_incorrect: bool,
    /// Whether the fermented classification is disputed
    pub fermented_incorrect: bool,
    /// Whether the pescatarian classification is disputed
    pub pescatarian_incorrect: bool,
    /// Free-text comment
    pub comment: Option<String>,
    /// Snapshot of the analysis under dispute, as submitted
    pub analysis_snapshot: serde_json::Value,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
}

impl DietaryFeedback {
    /// Whether this record disputes at least one classification and therefore
    /// counts toward the review threshold
    #[must_use]
    pub const fn disputes_classification(&self) -> bool {
        self.low_fodmap_incorrect || self.fermented_incorrect || self.pescatarian_incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_round_trip() {
        assert_eq!(Severity::parse("severe"), Severity::Severe);
        assert_eq!(Severity::parse(Severity::Moderate.as_str()), Severity::Moderate);
        // Unknown values fall back to the mildest level
        assert_eq!(Severity::parse("unknown"), Severity::Mild);
    }

    #[test]
    fn test_affinity_round_trip() {
        for level in [
            AffinityLevel::Love,
            AffinityLevel::Like,
            AffinityLevel::Neutral,
            AffinityLevel::Dislike,
        ] {
            assert_eq!(AffinityLevel::parse(level.as_str()), level);
        }
    }

    #[test]
    fn test_feedback_dispute_detection() {
        let mut feedback = DietaryFeedback {
            id: Uuid::new_v4(),
            recipe_id: Uuid::new_v4(),
            low_fodmap_incorrect: false,
            fermented_incorrect: false,
            pescatarian_incorrect: false,
            comment: None,
            analysis_snapshot: serde_json::Value::Null,
            created_at: Utc::now(),
        };
        assert!(!feedback.disputes_classification());
        feedback.fermented_incorrect = true;
        assert!(feedback.disputes_classification());
    }
}
