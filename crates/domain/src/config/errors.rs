use thiserror::Error;

/// Configuration errors are always fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid pool-size: {0} (must be >= 1)")]
    InvalidPoolSize(u32),

    #[error("invalid store-path: {0}")]
    InvalidStorePath(String),
}
