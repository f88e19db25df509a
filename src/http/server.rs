//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the rejection handler
//! - Wire up middleware (rate limit, timeout, tracing, request ID)
//! - Run the accept loop and hand connections to the net layer
//! - Drain connections on shutdown

use axum::{http::StatusCode, middleware, routing::any, Router};
use hyper_util::server::graceful::GracefulShutdown;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handler::rejection_handler;
use crate::net::connection::{connection_builder, serve_connection};
use crate::net::listener::{back_off_after_accept_error, ACCEPT_ERROR_DELAY};
use crate::reasons::ReasonList;
use crate::security::{rate_limit_middleware, RateLimiter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub reasons: ReasonList,
    pub limiter: Arc<RateLimiter>,
}

/// HTTP server for the rejection endpoint.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and reasons.
    pub fn new(config: ServiceConfig, reasons: ReasonList) -> Self {
        let state = AppState {
            reasons,
            limiter: Arc::new(RateLimiter::from_config(&config.rate_limit)),
        };

        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let limiter = Arc::clone(&state.limiter);
        let routes = Router::new()
            .route("/no", any(rejection_handler))
            .fallback(|| async { StatusCode::NOT_FOUND })
            .with_state(state);
        apply_layers(routes, config, limiter)
    }

    /// Run the server until `shutdown` fires, then drain connections.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            reasons = self.state.reasons.len(),
            "HTTP server starting"
        );

        let builder = connection_builder(&self.config.timeouts);
        let graceful = GracefulShutdown::new();
        let idle_timeout = self.config.timeouts.idle();

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => serve_connection(
                            stream,
                            peer,
                            self.router.clone(),
                            &builder,
                            &graceful,
                            idle_timeout,
                        ),
                        Err(e) => back_off_after_accept_error(&e, ACCEPT_ERROR_DELAY).await,
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown requested, no longer accepting connections");
                    break;
                }
            }
        }

        drop(listener);

        tokio::select! {
            () = graceful.shutdown() => tracing::info!("All connections drained"),
            () = tokio::time::sleep(self.config.timeouts.shutdown_grace()) => {
                tracing::warn!("Shutdown grace period elapsed, dropping remaining connections");
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Wrap routes in the middleware stack. From the outside in: request ID,
/// tracing, write timeout (408), rate limiter.
#[allow(deprecated)]
fn apply_layers(routes: Router, config: &ServiceConfig, limiter: Arc<RateLimiter>) -> Router {
    routes
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
        .layer(TimeoutLayer::new(config.timeouts.write()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
