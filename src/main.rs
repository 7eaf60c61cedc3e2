//! # Comments Server
//!
//! A comments-on-posts backend with cached reads and live fan-out.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - Redis cache (optional)
//! - HTTP/WebSocket server

use anyhow::Result;
use tracing::info;

use comments_server::config::Settings;
use comments_server::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    comments_server::telemetry::init_tracing();

    info!("Starting Comments Server...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
