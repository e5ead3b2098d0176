//! Carry a structured logger through a request-scoped [`Context`].
//!
//! Handlers, middleware and interceptors often have fixed signatures. Binding
//! a [`Logger`] (an [`slog::Logger`]) into the context they already receive
//! lets them log with the fields gathered further up the chain.
//!
//! ```
//! use ctxlog::Context;
//! use slog::o;
//!
//! let ctx = ctxlog::new_logger(&Context::background(), o!("request_id" => "r-1"));
//! let ctx = ctxlog::add_fields(&ctx, o!("user" => "alice"));
//! ctxlog::info(&ctx, "request accepted", o!("items" => 3));
//! ```

#[macro_use]
extern crate slog;

pub mod binding;
pub mod config;
pub mod context;
pub mod http;
pub mod logger;
pub mod observability;

pub use binding::{
    add_fields, crit, debug, error, get_logger, info, log, new_logger, set_logger, warn, CtxLogger,
};
pub use config::CtxlogConfig;
pub use context::Context;
pub use http::ContextLayer;
pub use logger::{FieldValue, Level, Logger, TracingDrain};
