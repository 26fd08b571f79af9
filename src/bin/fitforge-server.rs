// ABOUTME: Server binary for the FitForge fitness tracking API
// ABOUTME: Loads configuration, initializes resources, and serves the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # FitForge API Server Binary
//!
//! Starts the token-authenticated REST API for users, workouts, exercises,
//! and workout-exercise associations.

use anyhow::Result;
use clap::Parser;
use fitforge::{
    auth::AuthManager, config::ServerConfig, database::Database, logging,
    resources::ServerResources, routes,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "fitforge-server")]
#[command(about = "FitForge - fitness tracking REST API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    logging::init_from_env()?;

    info!("Starting FitForge API");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized: {}", config.database_url);

    let auth_manager = AuthManager::new(config.jwt_secret.as_bytes(), config.token_expiry_hours);
    let http_port = config.http_port;

    let resources = Arc::new(ServerResources::new(database, auth_manager, config));
    let app = routes::router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", http_port)).await?;
    info!("Server listening on port {http_port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {e}");
    }
}
