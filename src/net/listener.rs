//! TCP listener setup.
//!
//! # Responsibilities
//! - Parse and bind the configured address
//! - Report the actual bound address (port 0 resolves here)

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured address does not parse.
    #[error("Invalid bind address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    Bind(#[from] std::io::Error),
}

/// Bind to the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|source| ListenerError::Address {
            address: config.bind_address.clone(),
            source,
        })?;

    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listener bound");
    Ok(listener)
}

/// Pause after a failed `accept` before trying again.
pub const ACCEPT_ERROR_DELAY: Duration = Duration::from_secs(1);

/// Log an accept failure and wait before the next attempt.
///
/// Errors such as EMFILE persist until descriptors are released; retrying
/// immediately would spin the accept loop.
pub async fn back_off_after_accept_error(error: &std::io::Error, delay: Duration) {
    tracing::warn!(error = %error, delay = ?delay, "Failed to accept connection, backing off");
    tokio::time::sleep(delay).await;
}
