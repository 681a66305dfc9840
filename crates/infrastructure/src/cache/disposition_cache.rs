use dnsward_domain::{Disposition, DispositionKind, Name, TableId};
use lru::LruCache;
use rustc_hash::{FxBuildHasher, FxHasher};
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// A cached disposition, restricted to the kinds a cache entry may hold.
///
/// `Alias` dispositions are not cached: the alias target can itself be a
/// chain that needs re-walking from the top on every query (its own
/// resolution may change if the store is reloaded), so caching would risk
/// serving a stale rewrite past a reload that the cache-clear step missed.
#[derive(Debug, Clone, Copy)]
struct CachedEntry {
    kind: DispositionKind,
    matched_rule: Option<TableId>,
}

impl CachedEntry {
    fn to_disposition(self) -> Disposition {
        match self.kind {
            DispositionKind::Terminate => {
                Disposition::terminate(self.matched_rule.unwrap_or(TableId::BlockExact))
            }
            DispositionKind::DnsBlock => {
                Disposition::dns_block(self.matched_rule.unwrap_or(TableId::FqdnDnsBlock))
            }
            DispositionKind::DnsAllow => {
                Disposition::dns_allow(self.matched_rule.unwrap_or(TableId::FqdnDnsAllow))
            }
            DispositionKind::Passthrough => Disposition::passthrough(),
            DispositionKind::Alias => unreachable!("alias dispositions are never cached"),
        }
    }
}

type Shard = Mutex<LruCache<Box<str>, CachedEntry, FxBuildHasher>>;

/// Sharded LRU disposition cache.
///
/// Entries never expire on a timer — there is no TTL gate. A disposition
/// stays cached until it is evicted for space or the whole cache is
/// cleared by the Refresh Controller after a reload. Sharding by name hash
/// spreads lock contention across `shards` independent LRU instances, each
/// bounded by an equal fraction of the configured total capacity.
pub struct LruDispositionCache {
    shards: Vec<Shard>,
    shard_capacity: usize,
}

impl LruDispositionCache {
    pub fn new(capacity: usize, shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let shard_capacity = (capacity / shard_count).max(1);
        let shards = (0..shard_count)
            .map(|_| {
                Mutex::new(LruCache::with_hasher(
                    NonZeroUsize::new(shard_capacity).unwrap(),
                    FxBuildHasher,
                ))
            })
            .collect();
        Self {
            shards,
            shard_capacity,
        }
    }

    fn shard_index(&self, name: &Name) -> usize {
        let mut hasher = FxHasher::default();
        name.as_str().hash(&mut hasher);
        (hasher.finish() as usize) % self.shards.len()
    }

    pub fn get(&self, name: &Name) -> Option<Disposition> {
        let idx = self.shard_index(name);
        let mut shard = self.shards[idx].lock().unwrap();
        shard.get(name.as_str()).map(|entry| entry.to_disposition())
    }

    /// Cache a terminal (non-alias) disposition for `name`.
    ///
    /// Silently ignores `Alias` dispositions, which this cache never
    /// stores.
    pub fn put(&self, name: &Name, disposition: &Disposition) {
        if disposition.kind == DispositionKind::Alias {
            return;
        }
        let idx = self.shard_index(name);
        let entry = CachedEntry {
            kind: disposition.kind,
            matched_rule: disposition.matched_rule,
        };
        self.shards[idx]
            .lock()
            .unwrap()
            .put(name.as_str().into(), entry);
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().unwrap().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shard_capacity(&self) -> usize {
        self.shard_capacity
    }

    /// Evict every cached entry. Called by the Refresh Controller
    /// immediately after a reload swaps in fresh Bloom/Regex indices, so
    /// no stale disposition can outlive the rule set that produced it.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.lock().unwrap().clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsward_domain::Name;

    #[test]
    fn put_then_get_round_trips() {
        let cache = LruDispositionCache::new(1_000, 4);
        let name = Name::normalize("blocked.example").unwrap();
        cache.put(&name, &Disposition::terminate(TableId::BlockExact));
        let got = cache.get(&name).unwrap();
        assert_eq!(got.kind, DispositionKind::Terminate);
    }

    #[test]
    fn alias_dispositions_are_never_cached() {
        let cache = LruDispositionCache::new(1_000, 4);
        let name = Name::normalize("www.example").unwrap();
        let target = Name::normalize("example.net").unwrap();
        cache.put(&name, &Disposition::alias(target));
        assert!(cache.get(&name).is_none());
    }

    #[test]
    fn clear_empties_every_shard() {
        let cache = LruDispositionCache::new(1_000, 4);
        let name = Name::normalize("blocked.example").unwrap();
        cache.put(&name, &Disposition::terminate(TableId::BlockExact));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn eviction_respects_shard_capacity() {
        let cache = LruDispositionCache::new(4, 1);
        for i in 0..10 {
            let name = Name::normalize(&format!("host{i}.example")).unwrap();
            cache.put(&name, &Disposition::passthrough());
        }
        assert!(cache.len() <= cache.shard_capacity());
    }
}
