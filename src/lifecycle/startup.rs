//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration (file, then CLI/env overrides, then validation)
//! - Load the reason list
//! - Build the HTTP server and bind its listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, no retry
//! - The listener binds last, so traffic only arrives once ready

use std::path::Path;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{validation::validate_config, Args, ConfigError, ServiceConfig};
use crate::http::HttpServer;
use crate::net::{self, ListenerError};
use crate::reasons::{ReasonList, ReasonsError};

/// Any error that prevents the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("reasons: {0}")]
    Reasons(#[from] ReasonsError),

    #[error("listener: {0}")]
    Listener(#[from] ListenerError),
}

/// Build the effective configuration from CLI arguments.
pub fn resolve_config(args: &Args) -> Result<ServiceConfig, StartupError> {
    let mut config = match &args.config {
        Some(path) => crate::config::load_config(path)?,
        None => ServiceConfig::default(),
    };

    args.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load reasons and construct the server.
pub fn prepare(config: ServiceConfig) -> Result<HttpServer, StartupError> {
    let reasons = ReasonList::load(Path::new(&config.reasons.path))?;
    tracing::info!(
        count = reasons.len(),
        path = %config.reasons.path,
        "Loaded reasons"
    );
    Ok(HttpServer::new(config, reasons))
}

/// Prepare the server and bind its listener.
pub async fn start(config: ServiceConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let server = prepare(config)?;
    let listener = net::bind(&server.config().listener).await?;
    Ok((server, listener))
}
