//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check filter directives parse
//! - Check target overrides name a target and a known level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: CtxlogConfig → Result<(), Vec<ValidationError>>

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::schema::CtxlogConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid level directive {directive:?}: {reason}")]
    InvalidLevel { directive: String, reason: String },

    #[error("target override with empty name")]
    EmptyTarget,

    #[error("invalid level {level:?} for target {target:?}: {reason}")]
    InvalidTargetLevel {
        target: String,
        level: String,
        reason: String,
    },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &CtxlogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let logging = &config.logging;

    if let Err(e) = EnvFilter::try_new(&logging.level) {
        errors.push(ValidationError::InvalidLevel {
            directive: logging.level.clone(),
            reason: e.to_string(),
        });
    }

    for (target, level) in &logging.targets {
        if target.trim().is_empty() {
            errors.push(ValidationError::EmptyTarget);
        }
        if let Err(e) = LevelFilter::from_str(level) {
            errors.push(ValidationError::InvalidTargetLevel {
                target: target.clone(),
                level: level.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
