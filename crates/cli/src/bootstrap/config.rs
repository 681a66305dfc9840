use dnsward_domain::config::{CliOverrides, Config};
use std::path::Path;
use tracing::info;

/// Load configuration from `config_path` (or fall back to defaults if the
/// file is absent), apply CLI-flag overrides, and validate it.
///
/// Validation failures (bad pool size, empty store path) are fatal at
/// startup — the only place in this crate an error is allowed to abort
/// the process rather than collapse into a passthrough disposition.
pub fn load_config(config_path: &Path, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load_or_default(config_path, &overrides)?;

    info!(
        config_file = %config_path.display(),
        store_path = %config.store.store_path,
        pool_size = config.store.pool_size,
        lru_capacity = config.cache.lru_capacity,
        "configuration loaded"
    );

    Ok(config)
}
