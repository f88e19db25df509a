//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Connection from net layer
//!     → server.rs (Axum router, middleware stack)
//!     → security::rate_limit (admit or 429)
//!     → handler.rs (pick reason)
//!         → request.rs (read Accept)
//!         → negotiate.rs (choose representation)
//!         → response.rs (serialize, set Content-Type)
//!     → Send to client
//! ```

pub mod handler;
pub mod negotiate;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{handle, rejection_handler};
pub use request::AcceptHeader;
pub use negotiate::{negotiate, MediaType};
pub use response::Reply;
pub use server::{AppState, HttpServer};
