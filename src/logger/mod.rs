//! Structured logger handles.
//!
//! Loggers are [`slog::Logger`]s. The process-wide root writes through
//! [`TracingDrain`], so whatever `tracing` subscriber is installed (see
//! `observability::logging`) stays the single sink.
//!
//! # Data Flow
//! ```text
//! slog::Logger (pairs bound with Logger::new(o!(..)))
//!     → drain (TracingDrain for root(), any slog drain otherwise)
//!     → fields::collect (one typed field per key, newest binding wins)
//!     → tracing event, target "ctxlog" or "ctxlog::crit"
//! ```
//!
//! # Design Decisions
//! - The root logger is built once and shared; [`new`] derives from it
//! - Loggers built with [`slog::Logger::root`] over another drain never
//!   touch `tracing`

pub mod drain;
pub mod fields;

use std::sync::OnceLock;

use slog::{BorrowedKV, OwnedKV, Record, RecordStatic, SendSyncRefUnwindSafeKV, KV};

pub use drain::{TracingDrain, CRIT_TARGET, TRACING_TARGET};
pub use fields::FieldValue;
pub use slog::{Discard, Drain, Level, LevelFilter, Logger};

static ROOT: OnceLock<Logger> = OnceLock::new();

/// The process-wide root logger, writing through [`TracingDrain`].
pub fn root() -> &'static Logger {
    ROOT.get_or_init(|| Logger::root(TracingDrain::new(), o!()))
}

/// A new child of the root logger carrying `kv`.
pub fn new<T>(kv: OwnedKV<T>) -> Logger
where
    T: SendSyncRefUnwindSafeKV + 'static,
{
    root().new(kv)
}

/// Emit one record at a level chosen at runtime.
///
/// The `slog` macros fix the level at the call site; this is the dynamic
/// counterpart.
pub fn log(logger: &Logger, level: Level, msg: &str, kv: &dyn KV) {
    logger.log(&Record::new(
        record_static(level),
        &format_args!("{}", msg),
        BorrowedKV(kv),
    ));
}

pub(crate) fn record_static(level: Level) -> &'static RecordStatic<'static> {
    static CRITICAL: RecordStatic<'static> = record_static!(Level::Critical, "");
    static ERROR: RecordStatic<'static> = record_static!(Level::Error, "");
    static WARNING: RecordStatic<'static> = record_static!(Level::Warning, "");
    static INFO: RecordStatic<'static> = record_static!(Level::Info, "");
    static DEBUG: RecordStatic<'static> = record_static!(Level::Debug, "");
    static TRACE: RecordStatic<'static> = record_static!(Level::Trace, "");

    match level {
        Level::Critical => &CRITICAL,
        Level::Error => &ERROR,
        Level::Warning => &WARNING,
        Level::Info => &INFO,
        Level::Debug => &DEBUG,
        Level::Trace => &TRACE,
    }
}
