//! Per-connection serving and lifecycle tracking.
//!
//! # Responsibilities
//! - Hand an accepted TCP stream to hyper with the router as service
//! - Attach the peer address to every request (`ConnectInfo`)
//! - Enforce the header read timeout and the keep-alive idle timeout
//! - Register the connection for graceful shutdown

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::{extract::ConnectInfo, Router};
use hyper::{body::Incoming, Request};
use hyper_util::{
    rt::{TokioExecutor, TokioIo, TokioTimer},
    server::{conn::auto, graceful::GracefulShutdown},
};
use tokio::net::TcpStream;
use tower::ServiceExt;

use crate::config::TimeoutConfig;

/// Global atomic counter for connection IDs.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Tracks whether a connection has a request in flight and when it last did.
#[derive(Debug, Clone)]
pub struct Activity {
    in_flight: Arc<AtomicUsize>,
    last_active: Arc<Mutex<Instant>>,
}

impl Activity {
    pub fn new() -> Self {
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            last_active: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Mark a request as started. The returned guard marks it finished on drop.
    pub fn begin(&self) -> BusyGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        BusyGuard {
            activity: self.clone(),
        }
    }

    fn touch(&self) {
        *self.last_active.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    /// When the connection becomes idle-expired, or `None` while busy.
    pub fn idle_deadline(&self, timeout: Duration) -> Option<Instant> {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            return None;
        }
        let last = *self.last_active.lock().unwrap_or_else(PoisonError::into_inner);
        Some(last + timeout)
    }

    /// Resolves once the connection has been idle for `timeout`.
    pub async fn idle_for(&self, timeout: Duration) {
        loop {
            match self.idle_deadline(timeout) {
                Some(deadline) if deadline <= Instant::now() => return,
                Some(deadline) => {
                    tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
                }
                None => tokio::time::sleep(timeout).await,
            }
        }
    }
}

impl Default for Activity {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard held for the duration of one request.
#[derive(Debug)]
pub struct BusyGuard {
    activity: Activity,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.activity.touch();
        self.activity.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Build the hyper connection builder shared by all connections.
pub fn connection_builder(timeouts: &TimeoutConfig) -> auto::Builder<TokioExecutor> {
    let mut builder = auto::Builder::new(TokioExecutor::new());
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(timeouts.read())
        .keep_alive(true);
    builder
}

/// Serve one accepted connection on a background task.
pub fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    router: Router,
    builder: &auto::Builder<TokioExecutor>,
    graceful: &GracefulShutdown,
    idle_timeout: Duration,
) {
    let id = ConnectionId::new();
    let activity = Activity::new();

    let request_activity = activity.clone();
    let service = hyper::service::service_fn(move |mut request: Request<Incoming>| {
        request.extensions_mut().insert(ConnectInfo(peer));
        let router = router.clone();
        let busy = request_activity.begin();
        async move {
            let response = router.oneshot(request).await;
            drop(busy);
            response
        }
    });

    let conn = builder
        .serve_connection(TokioIo::new(stream), service)
        .into_owned();
    let conn = graceful.watch(conn);

    tracing::trace!(connection_id = %id, peer = %peer, "Connection accepted");

    tokio::spawn(async move {
        tokio::select! {
            result = conn => {
                if let Err(e) = result {
                    tracing::debug!(connection_id = %id, error = %e, "Connection ended with error");
                }
            }
            () = activity.idle_for(idle_timeout) => {
                tracing::debug!(connection_id = %id, "Idle timeout, closing connection");
            }
        }
        tracing::trace!(connection_id = %id, "Connection closed");
    });
}
