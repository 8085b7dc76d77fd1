// ABOUTME: Ladle recipe-discovery API library
// ABOUTME: User preferences, allergies, favorites, and dietary feedback over a sqlite store
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Ladle
//!
//! Thin application layer for a recipe-discovery service. Owns the
//! per-user preference, allergy, cuisine-affinity, and favorites data,
//! dietary classification feedback with review escalation, recipe title
//! suggestions, and a client-local recently-viewed ledger. Identity
//! federation, rendering, and image storage stay external.

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Session token issuance and validation
pub mod auth;
/// Environment-driven server configuration
pub mod config;
/// Sqlite persistence layer, one operations module per domain
pub mod database;
/// Error taxonomy and HTTP error envelope
pub mod errors;
/// External collaborator clients (transactional email)
pub mod external;
/// Structured logging setup
pub mod logging;
/// Session guard and CORS middleware
pub mod middleware;
/// Core domain types
pub mod models;
/// Client-local recently-viewed recipe ledger
pub mod recently_viewed;
/// HTTP route handlers by domain
pub mod routes;
/// Server assembly and serving loop
pub mod server;
