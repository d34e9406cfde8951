pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{stdio, tooling};
pub use cli::{Cli, RunMode};
pub use config::{AppConfig, KarbonConfig};
pub use domain::types;
pub use infrastructure::{karbon, rpc, server};

use karbon::KarbonClient;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tooling::KarbonTools;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting karbon-mcp");
    debug!(mode = ?cli.mode, config = ?cli.config, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let app_config = AppConfig::load(config_path)?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "Loaded configuration from file");
    } else {
        info!("Loaded configuration from default path");
    }
    debug!(karbon = ?app_config.karbon, "Resolved Karbon connection settings");

    let client = KarbonClient::from_config(&app_config.karbon)?;
    let tools = KarbonTools::new(Arc::new(client));

    info!(mode = ?cli.mode, "Running server in selected mode");
    match cli.mode {
        RunMode::Stdio => {
            tokio::select! {
                result = stdio::run(tools) => result?,
                _ = shutdown_signal() => info!("Shutdown signal received"),
            }
        }
        RunMode::Rest => {
            let addr = cli.rest_addr.unwrap_or(app_config.rest_addr);
            info!(%addr, "Starting REST server");
            server::serve(tools, addr, shutdown_signal()).await?;
        }
    }
    info!("Server execution finished");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// Protocol frames go to stdout, so diagnostics are written to stderr.
fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
