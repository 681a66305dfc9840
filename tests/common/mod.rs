//! Shared fixtures for the policy pipeline flow tests.
//!
//! Builds a throwaway SQLite file with the six rule tables plus the two
//! IP-rewrite tables from spec.md §3.1, seeds it with whatever rows a
//! test needs, then opens it through the same [`PolicyEngine`] the CLI
//! uses — no mocking of the store layer, matching the teacher's
//! `tests/` crate preference for real SQLite files over fakes.

use dnsward_domain::config::Config;
use dnsward_infrastructure::PolicyEngine;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{Connection, Executor, SqliteConnection};
use std::str::FromStr;
use tempfile::NamedTempFile;

const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE block_regex (pattern TEXT PRIMARY KEY)",
    "CREATE TABLE block_exact (key TEXT PRIMARY KEY)",
    "CREATE TABLE domain_alias (key TEXT PRIMARY KEY, target TEXT NOT NULL)",
    "CREATE TABLE block_wildcard (key TEXT PRIMARY KEY)",
    "CREATE TABLE fqdn_dns_allow (key TEXT PRIMARY KEY)",
    "CREATE TABLE fqdn_dns_block (key TEXT PRIMARY KEY)",
    "CREATE TABLE ip_rewrite_v4 (key TEXT PRIMARY KEY, target TEXT NOT NULL)",
    "CREATE TABLE ip_rewrite_v6 (key TEXT PRIMARY KEY, target TEXT NOT NULL)",
];

/// A throwaway policy store backing a running [`PolicyEngine`].
///
/// Keeps the underlying tempfile alive for the lifetime of the test; the
/// engine holds its own read-only connection pool to the same path.
pub struct TestStore {
    _tmp: NamedTempFile,
    pub path: String,
}

/// Create a fresh SQLite file with the policy schema and the given seed
/// `INSERT` statements already applied.
pub async fn build_store(inserts: &[&str]) -> TestStore {
    let tmp = NamedTempFile::new().expect("create tempfile for test store");
    let path = tmp.path().to_str().expect("tempfile path is valid utf8").to_string();

    let options = SqliteConnectOptions::from_str(&path)
        .expect("parse sqlite connect options")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    let mut conn = SqliteConnection::connect_with(&options)
        .await
        .expect("open writable sqlite connection for seeding");

    for stmt in SCHEMA_STATEMENTS {
        conn.execute(*stmt).await.expect("create schema table");
    }
    for stmt in inserts {
        conn.execute(*stmt).await.expect("seed row");
    }
    drop(conn);

    TestStore { _tmp: tmp, path }
}

/// Build a [`PolicyEngine`] against `store`, with a config suitable for
/// tests (small pool, small LRU, defaults otherwise).
pub async fn build_engine(store: &TestStore) -> PolicyEngine {
    let mut config = Config::default();
    config.store.store_path = store.path.clone();
    config.store.pool_size = 2;
    config.cache.lru_capacity = 1_000;
    config.cache.shards = 2;
    PolicyEngine::new(&config).await
}

/// Build an engine against a store path that does not exist, exercising
/// the §4.2 "store cannot be opened" degraded mode.
pub async fn build_engine_with_missing_store() -> PolicyEngine {
    let mut config = Config::default();
    config.store.store_path = "/nonexistent/dnsward-test-store.db".to_string();
    config.store.pool_size = 2;
    PolicyEngine::new(&config).await
}
