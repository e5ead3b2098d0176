//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct CtxlogConfig {
    /// Subscriber settings.
    pub logging: LoggingConfig,
}

/// Output layout of the `fmt` layer.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Subscriber configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (e.g. "info", "my_app=debug,ctxlog=warn").
    pub level: String,

    /// Output layout.
    pub format: LogFormat,

    /// Colour output (ignored for JSON).
    pub ansi: bool,

    /// Include the event target in output.
    pub with_target: bool,

    /// Per-target level overrides appended to `level`.
    pub targets: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            ansi: true,
            with_target: true,
            targets: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// `level` followed by every target override, comma-separated.
    pub fn directives(&self) -> String {
        let mut out = self.level.clone();
        for (target, level) in &self.targets {
            if !out.is_empty() {
                out.push(',');
            }
            out.push_str(target);
            out.push('=');
            out.push_str(level);
        }
        out
    }
}
