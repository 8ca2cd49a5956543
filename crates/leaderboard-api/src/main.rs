//! Voter leaderboard API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p leaderboard-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use leaderboard_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().inspect_err(|e| {
        eprintln!("Failed to load configuration: {e}");
    })?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.server.port,
        route_prefix = %config.server.route_prefix,
        store = if config.redis.is_some() { "redis" } else { "memory" },
        "Configuration loaded"
    );

    leaderboard_api::run(config).await?;

    Ok(())
}
