use super::{BloomConfig, CacheConfig, ConfigError, LoggingConfig, PipelineConfig, RegexConfig, StoreConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration, assembled from the per-concern structs.
///
/// Deserialized from a TOML file; every field has a default, so a missing
/// or partial file is not an error — only a malformed one is.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub bloom: BloomConfig,
    #[serde(default)]
    pub regex: RegexConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file at `path`, then apply `overrides`.
    pub fn load(path: &Path, overrides: &CliOverrides) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        overrides.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but tolerates a missing file by falling back
    /// to defaults (useful for `dnsward --store-path ... ` invocations with
    /// no config file at all).
    pub fn load_or_default(path: &Path, overrides: &CliOverrides) -> Result<Config, ConfigError> {
        if path.exists() {
            Config::load(path, overrides)
        } else {
            let mut config = Config::default();
            overrides.apply(&mut config);
            config.validate()?;
            Ok(config)
        }
    }

    /// Fatal, start-up-time validation.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.pool_size == 0 {
            return Err(ConfigError::InvalidPoolSize(self.store.pool_size));
        }
        if self.store.store_path.trim().is_empty() {
            return Err(ConfigError::InvalidStorePath(self.store.store_path.clone()));
        }
        Ok(())
    }
}

/// CLI-flag overrides layered on top of a loaded [`Config`].
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub store_path: Option<String>,
    pub pool_size: Option<u32>,
    pub lru_capacity: Option<usize>,
    pub log_level: Option<String>,
}

impl CliOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(ref p) = self.store_path {
            config.store.store_path = p.clone();
        }
        if let Some(p) = self.pool_size {
            config.store.pool_size = p;
        }
        if let Some(c) = self.lru_capacity {
            config.cache.lru_capacity = c;
        }
        if let Some(ref l) = self.log_level {
            config.logging.level = l.clone();
        }
    }
}
