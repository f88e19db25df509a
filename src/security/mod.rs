//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (check per-client last-seen slot)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Runs before any handler, including unmatched routes
//! - Fail closed: a rejected request never reaches the handler

pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, RateLimiter};
