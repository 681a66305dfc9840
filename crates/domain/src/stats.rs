//! Observability counters.
//!
//! Plain atomics rather than a metrics-exporter crate: exporting belongs to
//! the host daemon, which is out of scope here. One atomic per counter,
//! `Ordering::Relaxed` everywhere since these are advisory statistics, not
//! synchronization primitives, plus a `snapshot()` that hands back a
//! plain-data struct for whatever the host chooses to do with it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters for one `PolicyEngine` instance.
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub total_queries: AtomicU64,

    pub lru_hits: AtomicU64,
    pub lru_misses: AtomicU64,

    pub bloom_checks: AtomicU64,
    pub bloom_positive: AtomicU64,

    pub regex_bucket_hits: AtomicU64,
    pub regex_residual_hits: AtomicU64,

    pub block_regex_hits: AtomicU64,
    pub block_exact_hits: AtomicU64,
    pub domain_alias_hits: AtomicU64,
    pub block_wildcard_hits: AtomicU64,
    pub fqdn_dns_allow_hits: AtomicU64,
    pub fqdn_dns_block_hits: AtomicU64,
    pub passthrough_total: AtomicU64,

    pub alias_expansions: AtomicU64,
    pub alias_depth_truncations: AtomicU64,

    pub ip_rewrites_v4: AtomicU64,
    pub ip_rewrites_v6: AtomicU64,

    pub store_errors: AtomicU64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        StatsSnapshot {
            total_queries: load(&self.total_queries),
            lru_hits: load(&self.lru_hits),
            lru_misses: load(&self.lru_misses),
            bloom_checks: load(&self.bloom_checks),
            bloom_positive: load(&self.bloom_positive),
            regex_bucket_hits: load(&self.regex_bucket_hits),
            regex_residual_hits: load(&self.regex_residual_hits),
            block_regex_hits: load(&self.block_regex_hits),
            block_exact_hits: load(&self.block_exact_hits),
            domain_alias_hits: load(&self.domain_alias_hits),
            block_wildcard_hits: load(&self.block_wildcard_hits),
            fqdn_dns_allow_hits: load(&self.fqdn_dns_allow_hits),
            fqdn_dns_block_hits: load(&self.fqdn_dns_block_hits),
            passthrough_total: load(&self.passthrough_total),
            alias_expansions: load(&self.alias_expansions),
            alias_depth_truncations: load(&self.alias_depth_truncations),
            ip_rewrites_v4: load(&self.ip_rewrites_v4),
            ip_rewrites_v6: load(&self.ip_rewrites_v6),
            store_errors: load(&self.store_errors),
        }
    }
}

/// A point-in-time, plain-data copy of [`PipelineStats`] suitable for
/// logging or serializing.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct StatsSnapshot {
    pub total_queries: u64,
    pub lru_hits: u64,
    pub lru_misses: u64,
    pub bloom_checks: u64,
    pub bloom_positive: u64,
    pub regex_bucket_hits: u64,
    pub regex_residual_hits: u64,
    pub block_regex_hits: u64,
    pub block_exact_hits: u64,
    pub domain_alias_hits: u64,
    pub block_wildcard_hits: u64,
    pub fqdn_dns_allow_hits: u64,
    pub fqdn_dns_block_hits: u64,
    pub passthrough_total: u64,
    pub alias_expansions: u64,
    pub alias_depth_truncations: u64,
    pub ip_rewrites_v4: u64,
    pub ip_rewrites_v6: u64,
    pub store_errors: u64,
}

impl StatsSnapshot {
    /// Fraction of lookups served from the LRU cache (`0.0` if no queries yet).
    pub fn lru_hit_rate(&self) -> f64 {
        let total = self.lru_hits + self.lru_misses;
        if total == 0 {
            0.0
        } else {
            self.lru_hits as f64 / total as f64
        }
    }

    /// Fraction of Bloom checks that came back positive.
    pub fn bloom_positive_rate(&self) -> f64 {
        if self.bloom_checks == 0 {
            0.0
        } else {
            self.bloom_positive as f64 / self.bloom_checks as f64
        }
    }
}
