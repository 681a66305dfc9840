use serde::{Deserialize, Serialize};

/// Regex bucket engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegexConfig {
    /// Above this many loaded patterns, a warning is logged.
    /// Default 100,000.
    #[serde(default = "default_warn_pattern_count")]
    pub warn_pattern_count: usize,

    /// Hard cap on loaded pattern count (`regex-hard-cap`). Loading refuses
    /// and the engine returns always-false beyond this. Default 1,000,000.
    #[serde(default = "default_hard_cap")]
    pub hard_cap: usize,
}

impl Default for RegexConfig {
    fn default() -> Self {
        Self {
            warn_pattern_count: default_warn_pattern_count(),
            hard_cap: default_hard_cap(),
        }
    }
}

fn default_warn_pattern_count() -> usize {
    100_000
}

fn default_hard_cap() -> usize {
    1_000_000
}
