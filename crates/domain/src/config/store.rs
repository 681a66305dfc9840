use serde::{Deserialize, Serialize};

/// Persistent store gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path to the persistent store file (`store-path`).
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Size of the read-only connection pool, P (`pool-size`). Default 32.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Shared page-cache size in bytes, C (`page-cache-bytes`).
    /// Default 40 GiB, sized for a large-memory deployment host.
    #[serde(default = "default_page_cache_bytes")]
    pub page_cache_bytes: u64,

    /// Per-operation busy-timeout. SQLite WAL readers wait this long for a
    /// writer-held lock before giving up. Default 5 s.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    /// WAL auto-checkpoint threshold in frames. Default 1000, suitable for
    /// a read-heavy workload with an external writer.
    #[serde(default = "default_wal_autocheckpoint")]
    pub wal_autocheckpoint: u32,

    /// Fixed page size applied at store open, via `PRAGMA page_size`. SQLite
    /// only honors this against a database with no tables yet, so against
    /// the already-populated store this connects to it is a no-op; the
    /// pragma is still issued so a store created fresh through this same
    /// connection path picks it up.
    #[serde(default = "default_page_size_bytes")]
    pub page_size_bytes: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            pool_size: default_pool_size(),
            page_cache_bytes: default_page_cache_bytes(),
            busy_timeout_secs: default_busy_timeout_secs(),
            wal_autocheckpoint: default_wal_autocheckpoint(),
            page_size_bytes: default_page_size_bytes(),
        }
    }
}

fn default_store_path() -> String {
    "./policy-store.db".to_string()
}

fn default_pool_size() -> u32 {
    32
}

fn default_page_cache_bytes() -> u64 {
    40 * 1024 * 1024 * 1024
}

fn default_busy_timeout_secs() -> u64 {
    5
}

fn default_wal_autocheckpoint() -> u32 {
    1_000
}

fn default_page_size_bytes() -> u32 {
    4096
}
