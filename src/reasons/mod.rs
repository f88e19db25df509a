//! Rejection reason catalogue.
//!
//! # Data Flow
//! ```text
//! reasons.json (JSON array of strings)
//!     → list.rs (read, parse, reject empty)
//!     → ReasonList (immutable, Arc-shared)
//!     → handler picks one per request
//! ```
//!
//! # Design Decisions
//! - Loaded once at startup; a bad file is fatal
//! - Never mutated afterwards, so no locking on the read path

pub mod list;

pub use list::{ReasonList, ReasonsError};
