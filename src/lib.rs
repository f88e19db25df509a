//! No-as-a-Service library.
//!
//! Serves a random rejection reason at `/no`, negotiated into JSON, plain
//! text, HTML or XML, behind a per-client rate limiter.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod reasons;
pub mod security;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use reasons::ReasonList;
