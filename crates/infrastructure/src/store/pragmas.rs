use dnsward_domain::config::StoreConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

/// Build the connect options shared by every connection in the read-only
/// pool: WAL journal mode (the store is written externally, never here),
/// a shared page cache across all connections in the process, and no
/// `create_if_missing` — a missing store file is a store-open failure, not
/// an invitation to create an empty one.
pub fn base_options(store_path: &str, cfg: &StoreConfig) -> Result<SqliteConnectOptions, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(store_path)?
        .create_if_missing(false)
        .read_only(true)
        .shared_cache(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(cfg.busy_timeout_secs))
        .pragma("temp_store", "MEMORY")
        .pragma("mmap_size", "0")
        .pragma("automatic_index", "OFF")
        .pragma("cache_size", format!("-{}", cfg.page_cache_bytes / 1024))
        .pragma("wal_autocheckpoint", cfg.wal_autocheckpoint.to_string())
        .pragma("page_size", cfg.page_size_bytes.to_string());

    Ok(options)
}
