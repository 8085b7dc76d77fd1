// ABOUTME: Ladle API server binary
// ABOUTME: Loads configuration, initializes the store, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Ladle Server Binary
//!
//! Starts the recipe-discovery API with session authentication over a
//! sqlite store.

use anyhow::Result;
use clap::Parser;
use ladle::{
    config::ServerConfig,
    database::Database,
    logging,
    server::{serve, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "ladle-server")]
#[command(about = "Ladle - recipe discovery API server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Ladle API server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized successfully");

    let resources = Arc::new(ServerResources::new(database, config));
    serve(resources).await?;

    Ok(())
}
