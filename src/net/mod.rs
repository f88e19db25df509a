//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, accept)
//!     → connection.rs (hyper serve, read/idle timeouts, graceful tracking)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - One task per connection
//! - Every connection is registered for graceful shutdown
//! - Idle keep-alive connections are closed rather than left open

pub mod connection;
pub mod listener;

pub use connection::{serve_connection, ConnectionId};
pub use listener::{back_off_after_accept_error, bind, ListenerError, ACCEPT_ERROR_DELAY};
