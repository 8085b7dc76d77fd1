// ABOUTME: HTTP middleware for the API server
// ABOUTME: Session guarding and CORS configuration

mod auth;
mod cors;

pub use auth::SessionGuard;
pub use cors::setup_cors;
