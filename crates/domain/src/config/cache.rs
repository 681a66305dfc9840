use serde::{Deserialize, Serialize};

/// LRU disposition cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Fixed capacity in slots (`lru-capacity`). Default 10,000.
    #[serde(default = "default_lru_capacity")]
    pub lru_capacity: usize,

    /// Number of shards the cache is split into, each with its own
    /// reader-writer lock. Sharding reduces contention on what would
    /// otherwise be a single global lock on the hottest path in the
    /// pipeline. Must divide `lru_capacity` evenly in spirit; any value
    /// works, shards just get an equal fraction of capacity. Default 16.
    #[serde(default = "default_shards")]
    pub shards: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            lru_capacity: default_lru_capacity(),
            shards: default_shards(),
        }
    }
}

fn default_lru_capacity() -> usize {
    10_000
}

fn default_shards() -> usize {
    16
}
