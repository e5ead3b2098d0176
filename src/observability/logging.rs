//! Structured logging backend.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Pick the output layout from configuration
//! - Honor `RUST_LOG` over the configured directives
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging; the root `Logger` forwards here
//! - JSON format for production, pretty format for development
//! - Initializing twice is an error, not a panic

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, LoggingConfig};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("a global subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the filter: `RUST_LOG` when set, else the configured directives.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, InitError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(config.directives())?),
    }
}

/// Install the global subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<(), InitError> {
    let filter = env_filter(config)?;

    let fmt = tracing_subscriber::fmt::layer().with_target(config.with_target);
    let fmt = match config.format {
        LogFormat::Pretty => fmt.with_ansi(config.ansi).pretty().boxed(),
        LogFormat::Compact => fmt.with_ansi(config.ansi).compact().boxed(),
        LogFormat::Json => fmt.with_ansi(false).json().boxed(),
    };

    tracing_subscriber::registry().with(filter).with(fmt).try_init()?;

    tracing::debug!(
        format = ?config.format,
        directives = %config.directives(),
        "Logging initialized"
    );
    Ok(())
}
