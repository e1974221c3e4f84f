use anyhow::Result;
use componentary_assistant::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parses a log filter such as `info` or `info,tower_http=debug`
fn build_env_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        anyhow::anyhow!(
            "Invalid log filter: '{}' ({}). Use a level such as info or debug, optionally with target=level directives",
            directives,
            e
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    let env_filter = match build_env_filter(&log_level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .init();

    info!(
        "Starting {} v{} with log level: {}",
        config.assistant.service_name, config.assistant.version, log_level
    );
    info!(
        "Model provider: {:?} ({})",
        config.model.provider, config.model.model
    );

    server::run(config).await?;

    Ok(())
}
