//! Embed and extract a [`Logger`] in a [`Context`].
//!
//! Useful where function signatures are fixed (HTTP handlers, middleware,
//! RPC interceptors) but log calls should still carry the fields gathered
//! further up the chain.
//!
//! Lookup is total: a context without a logger, or with something else
//! stored under [`CtxLogger::Logger`], resolves to a fresh root child.

use slog::{OwnedKV, SendSyncRefUnwindSafeKV};

use crate::context::Context;
use crate::logger::{self, fields, Level, Logger};

/// Context key under which the logger is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CtxLogger {
    Logger,
}

/// Bind `logger` into a derived context, first deriving a child carrying
/// `kv` when it has any pairs.
pub fn set_logger<T>(ctx: &Context, logger: &Logger, kv: OwnedKV<T>) -> Context
where
    T: SendSyncRefUnwindSafeKV + 'static,
{
    let logger = if fields::is_empty(&kv.0) {
        logger.clone()
    } else {
        logger.new(kv)
    };
    ctx.with_value(CtxLogger::Logger, logger)
}

/// Bind a new child of the root logger carrying `kv`.
pub fn new_logger<T>(ctx: &Context, kv: OwnedKV<T>) -> Context
where
    T: SendSyncRefUnwindSafeKV + 'static,
{
    ctx.with_value(CtxLogger::Logger, logger::new(kv))
}

/// Logger bound to `ctx`, or a new root child when there is none.
pub fn get_logger(ctx: &Context) -> Logger {
    match ctx.get::<_, Logger>(&CtxLogger::Logger) {
        Some(logger) => logger.clone(),
        None => logger::new(o!()),
    }
}

/// Append `kv` to whichever logger `ctx` resolves to.
pub fn add_fields<T>(ctx: &Context, kv: OwnedKV<T>) -> Context
where
    T: SendSyncRefUnwindSafeKV + 'static,
{
    set_logger(ctx, &get_logger(ctx), kv)
}

/// Log `msg` at `level` through the logger `ctx` resolves to.
pub fn log<T>(ctx: &Context, level: Level, msg: &str, kv: OwnedKV<T>)
where
    T: SendSyncRefUnwindSafeKV,
{
    logger::log(&get_logger(ctx), level, msg, &kv.0)
}

/// `log(ctx, Level::Debug, ..)`
pub fn debug<T: SendSyncRefUnwindSafeKV>(ctx: &Context, msg: &str, kv: OwnedKV<T>) {
    log(ctx, Level::Debug, msg, kv)
}

/// `log(ctx, Level::Info, ..)`
pub fn info<T: SendSyncRefUnwindSafeKV>(ctx: &Context, msg: &str, kv: OwnedKV<T>) {
    log(ctx, Level::Info, msg, kv)
}

/// `log(ctx, Level::Warning, ..)`
pub fn warn<T: SendSyncRefUnwindSafeKV>(ctx: &Context, msg: &str, kv: OwnedKV<T>) {
    log(ctx, Level::Warning, msg, kv)
}

/// `log(ctx, Level::Error, ..)`
pub fn error<T: SendSyncRefUnwindSafeKV>(ctx: &Context, msg: &str, kv: OwnedKV<T>) {
    log(ctx, Level::Error, msg, kv)
}

/// `log(ctx, Level::Critical, ..)`
pub fn crit<T: SendSyncRefUnwindSafeKV>(ctx: &Context, msg: &str, kv: OwnedKV<T>) {
    log(ctx, Level::Critical, msg, kv)
}
