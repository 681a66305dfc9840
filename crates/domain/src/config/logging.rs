use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing` max level: "trace" | "debug" | "info" | "warn" | "error".
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit one structured line per classification. Off by default — the
    /// hot path should not pay for per-query I/O unless an operator
    /// explicitly asks for it.
    #[serde(default)]
    pub verbose_per_query: bool,

    /// Render logs as JSON instead of the default human-readable format.
    #[serde(default)]
    pub json: bool,

    /// Maximum number of rate-limited error log lines emitted per second,
    /// per error kind.
    #[serde(default = "default_error_log_rate")]
    pub error_log_rate_per_sec: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            verbose_per_query: false,
            json: false,
            error_log_rate_per_sec: default_error_log_rate(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_error_log_rate() -> u32 {
    5
}
