//! No-as-a-Service
//!
//! ```text
//!     Client Request
//!     ──────────────▶ net (accept, timeouts)
//!                      → security::rate_limit (429 if too soon)
//!                      → http::handler (random reason)
//!                      → http::negotiate (Accept → format)
//!                      → http::response (JSON / text / HTML / XML)
//!     ◀────────────── Response
//! ```

use clap::Parser;

use no_as_a_service::config::Args;
use no_as_a_service::lifecycle::{signals, startup, Shutdown};
use no_as_a_service::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match startup::resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet; fall back to defaults for this one message.
            logging::init_logging(&Default::default());
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("no-as-a-service v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        reasons_path = %config.reasons.path,
        rate_limit_enabled = config.rate_limit.enabled,
        min_interval_ms = config.rate_limit.min_interval_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics exporter");
            }
        }
    }

    let (server, listener) = match startup::start(config).await {
        Ok(started) => started,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
