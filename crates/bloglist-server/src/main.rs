//! # Blog List Server
//!
//! ## Startup Sequence
//!
//! 1. Initialise logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (defaults, then `BLOGLIST_CONFIG` file, then env)
//! 3. Validate configuration and build the service
//! 4. Serve until Ctrl+C, then drain in-flight requests

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bloglist_api::{BlogListService, ServiceConfig};

/// Environment variable naming an optional TOML config file
const ENV_CONFIG_PATH: &str = "BLOGLIST_CONFIG";

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install tracing subscriber")
}

fn load_config() -> Result<ServiceConfig> {
    let mut config = match std::env::var(ENV_CONFIG_PATH) {
        Ok(path) => {
            info!(path = %path, "Loading configuration file");
            ServiceConfig::load(&path).with_context(|| format!("loading {}", path))?
        }
        Err(_) => ServiceConfig::default(),
    };

    config
        .apply_env()
        .context("applying BLOGLIST_* environment overrides")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = load_config()?;
    info!(addr = %config.http_addr(), token_ttl = ?config.auth.token_ttl, "Starting blog list server");

    let service = Arc::new(BlogListService::in_memory(config).context("invalid configuration")?);

    let mut server = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.start().await })
    };

    let joined = tokio::select! {
        // Bind or serve failed before any signal arrived.
        joined = &mut server => joined,
        result = tokio::signal::ctrl_c() => {
            result.context("listening for Ctrl+C")?;
            info!("Received Ctrl+C, shutting down");
            service.shutdown();
            server.await
        }
    };

    match joined {
        Ok(result) => result.context("server failed")?,
        Err(e) => {
            error!(error = %e, "Server task panicked");
            return Err(e.into());
        }
    }

    Ok(())
}
