// ABOUTME: Configuration module for centralized server settings
// ABOUTME: Loads environment-driven configuration for the HTTP server, store, and mailer
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration module for the Ladle server.
//!
//! All configuration is environment-driven; [`environment::ServerConfig`] is
//! built once at startup and shared read-only through the server resources.

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseUrl, EmailConfig, Environment, LogLevel, ServerConfig};
