//! Structured logging setup and request trace propagation.

use serde::Deserialize;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod trace;

pub use crate::logging::trace::TraceScope;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "json".to_string())
            .to_lowercase()
            .as_str()
        {
            "compact" | "text" => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    /// allowed: trace, debug, info, warn, error
    pub level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, format: LogFormat) -> Self {
        Self {
            level: level.into(),
            format,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Initialize tracing with the desired config.
///
/// Safe to call more than once; later calls leave the installed
/// subscriber in place. The `DEBUG` environment variable forces the
/// debug level regardless of the configured one.
pub fn init(cfg: &LoggingConfig) {
    let level = if debug_env_enabled() {
        "debug"
    } else {
        cfg.level.as_str()
    };
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match cfg.format {
        LogFormat::Json => {
            // CRI log parsers expect flattened fields and no ANSI codes
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true)
                .with_ansi(false);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}

fn debug_env_enabled() -> bool {
    std::env::var("DEBUG")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "on"))
        .unwrap_or(false)
}
