//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! slog loggers / binding calls
//!     → TracingDrain (one tracing field per pair, target "ctxlog" or "ctxlog::crit")
//!     → logging.rs subscriber (EnvFilter + fmt layer)
//!     → stdout (pretty, compact or JSON)
//! ```

pub mod logging;

pub use logging::{init, InitError};
