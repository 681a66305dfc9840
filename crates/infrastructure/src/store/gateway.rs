use super::pragmas::base_options;
use dnsward_domain::config::StoreConfig;
use dnsward_domain::{Name, PolicyError};
use sqlx::{Row, SqliteConnection};
use std::cell::Cell;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, warn};

thread_local! {
    static STICKY_INDEX: Cell<Option<usize>> = Cell::new(None);
}

/// A `domain_alias` or `block_wildcard`/`fqdn_dns_*` match: the table key
/// that matched (used to compute the preserved subdomain prefix) plus,
/// for `domain_alias`, the rewrite target.
#[derive(Debug, Clone)]
pub struct AliasMatch {
    pub key: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct WildcardMatch {
    pub key: String,
}

/// Gateway to the externally-written, externally-maintained policy store.
///
/// Holds a fixed pool of `P` read-only SQLite connections sharing one page
/// cache. Connection acquisition is thread-local and sticky: the first
/// thread to ask for a connection is assigned `counter mod P` and keeps
/// that index for the rest of its lifetime, so a given worker thread's
/// repeated queries land on the same connection (and reuse its statement
/// cache) instead of bouncing across the pool.
///
/// If the store cannot be opened at construction time this is not treated
/// as fatal: the gateway logs once and every subsequent probe returns
/// `Err`, which callers are expected to collapse into PASSTHROUGH.
pub struct PersistentStoreGateway {
    connections: Vec<Mutex<SqliteConnection>>,
    next_index: AtomicUsize,
    degraded: AtomicBool,
}

impl PersistentStoreGateway {
    pub async fn open(cfg: &StoreConfig) -> Self {
        match Self::try_open(cfg).await {
            Ok(gateway) => gateway,
            Err(err) => {
                error!(store_path = %cfg.store_path, error = %err, "failed to open policy store; degrading to passthrough for every query");
                PersistentStoreGateway {
                    connections: Vec::new(),
                    next_index: AtomicUsize::new(0),
                    degraded: AtomicBool::new(true),
                }
            }
        }
    }

    async fn try_open(cfg: &StoreConfig) -> Result<Self, sqlx::Error> {
        use sqlx::Connection;

        let options = base_options(&cfg.store_path, cfg)?;
        let mut connections = Vec::with_capacity(cfg.pool_size as usize);
        for _ in 0..cfg.pool_size {
            let conn = SqliteConnection::connect_with(&options).await?;
            connections.push(Mutex::new(conn));
        }

        Ok(PersistentStoreGateway {
            connections,
            next_index: AtomicUsize::new(0),
            degraded: AtomicBool::new(false),
        })
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    fn sticky_index(&self) -> usize {
        STICKY_INDEX.with(|cell| {
            if let Some(idx) = cell.get() {
                return idx;
            }
            let idx = self.next_index.fetch_add(1, Ordering::Relaxed) % self.connections.len();
            cell.set(Some(idx));
            idx
        })
    }

    async fn with_connection<F, T>(&self, f: F) -> Result<T, PolicyError>
    where
        F: for<'c> FnOnce(
            &'c mut SqliteConnection,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = Result<T, sqlx::Error>> + Send + 'c>,
        >,
    {
        if self.degraded.load(Ordering::Relaxed) || self.connections.is_empty() {
            return Err(PolicyError::StoreOpenError(
                "policy store is not available".to_string(),
            ));
        }
        let idx = self.sticky_index();
        let mut guard = self.connections[idx].lock().await;
        f(&mut guard).await.map_err(|e| {
            warn!(error = %e, "store probe failed");
            PolicyError::StoreProbeError(e.to_string())
        })
    }

    /// `SELECT 1 FROM block_exact WHERE key = ? LIMIT 1`
    pub async fn block_exact_contains(&self, name: &Name) -> Result<bool, PolicyError> {
        let key = name.as_str().to_string();
        self.with_connection(move |conn| {
            Box::pin(async move {
                let row = sqlx::query("SELECT 1 FROM block_exact WHERE key = ? LIMIT 1")
                    .bind(key)
                    .fetch_optional(conn)
                    .await?;
                Ok(row.is_some())
            })
        })
        .await
    }

    /// Longest-key wildcard-style match against `domain_alias`: `key = ?`
    /// or `? LIKE '%.' || key`, ordered so the most specific key wins.
    pub async fn domain_alias_lookup(&self, name: &Name) -> Result<Option<AliasMatch>, PolicyError> {
        let n1 = name.as_str().to_string();
        let n2 = n1.clone();
        self.with_connection(move |conn| {
            Box::pin(async move {
                let row = sqlx::query(
                    "SELECT key, target FROM domain_alias \
                     WHERE key = ? OR ? LIKE ('%.' || key) \
                     ORDER BY length(key) DESC LIMIT 1",
                )
                .bind(n1)
                .bind(n2)
                .fetch_optional(conn)
                .await?;
                Ok(row.map(|r| AliasMatch {
                    key: r.get::<String, _>("key"),
                    target: r.get::<String, _>("target"),
                }))
            })
        })
        .await
    }

    /// Longest-key wildcard-style match against `block_wildcard`.
    pub async fn block_wildcard_lookup(&self, name: &Name) -> Result<Option<WildcardMatch>, PolicyError> {
        self.wildcard_lookup("block_wildcard", name).await
    }

    /// Longest-key wildcard-style match against `fqdn_dns_allow`.
    pub async fn fqdn_dns_allow_lookup(&self, name: &Name) -> Result<Option<WildcardMatch>, PolicyError> {
        self.wildcard_lookup("fqdn_dns_allow", name).await
    }

    /// Longest-key wildcard-style match against `fqdn_dns_block`.
    pub async fn fqdn_dns_block_lookup(&self, name: &Name) -> Result<Option<WildcardMatch>, PolicyError> {
        self.wildcard_lookup("fqdn_dns_block", name).await
    }

    async fn wildcard_lookup(&self, table: &str, name: &Name) -> Result<Option<WildcardMatch>, PolicyError> {
        let n1 = name.as_str().to_string();
        let n2 = n1.clone();
        let sql = format!(
            "SELECT key FROM {table} WHERE key = ? OR ? LIKE ('%.' || key) ORDER BY length(key) DESC LIMIT 1"
        );
        self.with_connection(move |conn| {
            Box::pin(async move {
                let row = sqlx::query(&sql).bind(n1).bind(n2).fetch_optional(conn).await?;
                Ok(row.map(|r| WildcardMatch {
                    key: r.get::<String, _>("key"),
                }))
            })
        })
        .await
    }

    /// `SELECT target FROM ip_rewrite_v4 WHERE key = ?`
    pub async fn ip_rewrite_v4_lookup(&self, addr: Ipv4Addr) -> Result<Option<Ipv4Addr>, PolicyError> {
        let key = addr.to_string();
        self.with_connection(move |conn| {
            Box::pin(async move {
                let row = sqlx::query("SELECT target FROM ip_rewrite_v4 WHERE key = ?")
                    .bind(key)
                    .fetch_optional(conn)
                    .await?;
                Ok(row.and_then(|r| r.get::<String, _>("target").parse().ok()))
            })
        })
        .await
    }

    /// `SELECT target FROM ip_rewrite_v6 WHERE key = ?`
    pub async fn ip_rewrite_v6_lookup(&self, addr: Ipv6Addr) -> Result<Option<Ipv6Addr>, PolicyError> {
        let key = addr.to_string();
        self.with_connection(move |conn| {
            Box::pin(async move {
                let row = sqlx::query("SELECT target FROM ip_rewrite_v6 WHERE key = ?")
                    .bind(key)
                    .fetch_optional(conn)
                    .await?;
                Ok(row.and_then(|r| r.get::<String, _>("target").parse().ok()))
            })
        })
        .await
    }

    /// Full scan of `block_regex`, used once at startup and on every
    /// reload to (re)compile the regex bucket engine.
    pub async fn load_all_regex_patterns(&self) -> Result<Vec<String>, PolicyError> {
        self.with_connection(move |conn| {
            Box::pin(async move {
                let rows = sqlx::query("SELECT pattern FROM block_regex")
                    .fetch_all(conn)
                    .await?;
                Ok(rows.into_iter().map(|r| r.get::<String, _>("pattern")).collect())
            })
        })
        .await
    }

    /// Full scan of `block_exact`, used once at startup and on every
    /// reload to (re)build the Bloom pre-filter.
    pub async fn load_all_exact_keys(&self) -> Result<Vec<String>, PolicyError> {
        self.with_connection(move |conn| {
            Box::pin(async move {
                let rows = sqlx::query("SELECT key FROM block_exact").fetch_all(conn).await?;
                Ok(rows.into_iter().map(|r| r.get::<String, _>("key")).collect())
            })
        })
        .await
    }
}

impl std::fmt::Debug for PersistentStoreGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentStoreGateway")
            .field("pool_size", &self.connections.len())
            .field("degraded", &self.is_degraded())
            .finish()
    }
}

/// Shared handle type used by the pipeline and the refresh controller.
pub type SharedStoreGateway = Arc<PersistentStoreGateway>;
