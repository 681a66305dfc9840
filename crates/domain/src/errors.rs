use thiserror::Error;

/// Errors surfaced by the policy engine.
///
/// Nothing downstream of `classify()` ever propagates one of these as a hard
/// failure to the DNS front-end: every variant that can occur mid-query is
/// caught at the pipeline boundary and collapsed into a
/// `Disposition::passthrough()`. Only construction-time errors (a bad store
/// path, an impossible pool size) are meant to bubble out of `main` as
/// fatal.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("store open error: {0}")]
    StoreOpenError(String),

    #[error("store probe error: {0}")]
    StoreProbeError(String),

    #[error("pattern compile error: {0}")]
    PatternCompileError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl PolicyError {
    /// Stable discriminant used to bucket error-log rate limiting by kind,
    /// so one noisy failure mode can't starve the log lines of another.
    pub fn kind(&self) -> &'static str {
        match self {
            PolicyError::InvalidDomainName(_) => "invalid_domain_name",
            PolicyError::StoreOpenError(_) => "store_open_error",
            PolicyError::StoreProbeError(_) => "store_probe_error",
            PolicyError::PatternCompileError(_) => "pattern_compile_error",
            PolicyError::ConfigError(_) => "config_error",
        }
    }
}
