//! Per-client rate limiting middleware.
//!
//! Each client gets a single last-seen slot: a request is admitted only if
//! the previous admitted request from the same client is at least
//! `min_interval` old. Slots older than `retention` are swept on every call.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::RateLimitConfig;
use crate::http::request::client_key;
use crate::observability::metrics;

/// Last-seen rate limiter keyed by client identifier.
pub struct RateLimiter {
    visitors: Mutex<HashMap<String, Instant>>,
    min_interval: Duration,
    retention: Duration,
    enabled: bool,
    trust_forwarded_for: bool,
}

impl RateLimiter {
    pub fn new(min_interval: Duration, retention: Duration) -> Self {
        Self {
            visitors: Mutex::new(HashMap::new()),
            min_interval,
            retention,
            enabled: true,
            trust_forwarded_for: false,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            trust_forwarded_for: config.trust_forwarded_for,
            ..Self::new(config.min_interval(), config.retention())
        }
    }

    /// Decide whether `key` may proceed now.
    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    /// Decide whether `key` may proceed at `now`.
    ///
    /// Sweep, check and update happen under one lock acquisition.
    pub fn allow_at(&self, key: &str, now: Instant) -> bool {
        if !self.enabled {
            return true;
        }

        let mut visitors = self.visitors.lock().unwrap_or_else(PoisonError::into_inner);

        let retention = self.retention;
        visitors.retain(|_, last_seen| now.saturating_duration_since(*last_seen) <= retention);
        metrics::record_visitors(visitors.len());

        if let Some(last_seen) = visitors.get(key) {
            if now.saturating_duration_since(*last_seen) < self.min_interval {
                return false;
            }
        }

        visitors.insert(key.to_string(), now);
        true
    }

    /// Number of clients currently remembered.
    pub fn tracked(&self) -> usize {
        self.visitors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn trusts_forwarded_for(&self) -> bool {
        self.trust_forwarded_for
    }
}

/// Middleware function for per-client rate limiting.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = client_key(request.headers(), addr, limiter.trusts_forwarded_for());

    if limiter.allow(&key) {
        next.run(request).await
    } else {
        tracing::warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        metrics::record_rate_limited();
        (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::CONTENT_TYPE, "text/plain")],
            "Too many requests",
        )
            .into_response()
    }
}
