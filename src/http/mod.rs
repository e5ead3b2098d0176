//! HTTP integration.
//!
//! # Data Flow
//! ```text
//! Request
//!     → [optional tower_http SetRequestIdLayer]
//!     → layer.rs ContextLayer (bind logger + request_id/method/path)
//!     → handler extracts `Context` and logs through `ctxlog::info(&ctx, ..)`
//! ```

pub mod layer;
pub mod request;

pub use layer::{ContextLayer, ContextService};
pub use request::{request_id, X_REQUEST_ID};
