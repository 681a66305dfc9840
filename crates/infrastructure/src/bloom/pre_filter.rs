use super::atomic_bloom::AtomicBloom;
use arc_swap::ArcSwap;
use dnsward_domain::config::BloomConfig;
use std::sync::Arc;
use tracing::warn;

/// Hot-swappable pre-filter in front of the `block_exact` table.
///
/// A miss here guarantees the name is absent from `block_exact` and the
/// Persistent Store Gateway's exact-match probe can be skipped entirely.
/// The filter is rebuilt wholesale (never mutated in place after a reload)
/// and swapped via `ArcSwap` so readers never block on a rebuild in
/// progress.
pub struct BloomPreFilter {
    inner: ArcSwap<AtomicBloom>,
    configured_capacity: usize,
    fp_rate: f64,
    rebuild_load_factor: f64,
}

impl BloomPreFilter {
    pub fn new(cfg: &BloomConfig) -> Self {
        Self {
            inner: ArcSwap::from_pointee(AtomicBloom::new(cfg.bloom_capacity, cfg.bloom_fp_rate)),
            configured_capacity: cfg.bloom_capacity,
            fp_rate: cfg.bloom_fp_rate,
            rebuild_load_factor: cfg.rebuild_load_factor,
        }
    }

    #[inline]
    pub fn check(&self, key: &str) -> bool {
        self.inner.load().check(key)
    }

    /// Rebuild from a freshly-scanned `block_exact` key set.
    ///
    /// If the actual key count exceeds `rebuild_load_factor` of the
    /// configured capacity, the filter is sized for the actual count
    /// instead — a fixed-size filter with too many entries degrades past
    /// its target false-positive rate, and every extra store probe a
    /// degraded filter lets through costs a query a full SQLite lookup.
    pub fn rebuild(&self, keys: &[String]) {
        let threshold = (self.configured_capacity as f64) * self.rebuild_load_factor;
        let sized_capacity = if (keys.len() as f64) > threshold {
            warn!(
                actual = keys.len(),
                configured_capacity = self.configured_capacity,
                "block_exact key count exceeds rebuild load factor; sizing bloom filter for actual count"
            );
            keys.len()
        } else {
            self.configured_capacity
        };

        let fresh = AtomicBloom::build_sized(keys, sized_capacity, self.fp_rate);
        self.inner.store(Arc::new(fresh));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> BloomConfig {
        BloomConfig {
            bloom_capacity: 100,
            bloom_fp_rate: 0.01,
            rebuild_load_factor: 0.70,
        }
    }

    #[test]
    fn rebuild_then_check_finds_inserted_keys() {
        let filter = BloomPreFilter::new(&cfg());
        let keys = vec!["blocked.example".to_string()];
        filter.rebuild(&keys);
        assert!(filter.check("blocked.example"));
    }

    #[test]
    fn oversized_key_set_still_rebuilds_without_panicking() {
        let filter = BloomPreFilter::new(&cfg());
        let keys: Vec<String> = (0..1000).map(|i| format!("host{i}.example")).collect();
        filter.rebuild(&keys);
        assert!(filter.check("host0.example"));
        assert!(filter.check("host999.example"));
    }
}
