//! # Travel Planner
//!
//! Entry point: loads configuration, sets up logging, then serves the API
//! until a shutdown signal arrives.

use anyhow::Result;
use tracing::info;

use travel_planner::config::Settings;
use travel_planner::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging depends on settings, so a bad configuration is reported on stderr
    let settings = Settings::load()?;

    travel_planner::telemetry::init_tracing(&settings.logging);

    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
