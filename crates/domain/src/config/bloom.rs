use serde::{Deserialize, Serialize};

/// Bloom pre-filter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BloomConfig {
    /// Expected cardinality of `block_exact` (`bloom-capacity`). Drives the
    /// initial bit-array size. Default sized for 10^8 entries; operators
    /// running the full 1-3x10^9 target set should raise this.
    #[serde(default = "default_bloom_capacity")]
    pub bloom_capacity: usize,

    /// Target false-positive rate (`bloom-fp-rate`). Default 0.01.
    #[serde(default = "default_bloom_fp_rate")]
    pub bloom_fp_rate: f64,

    /// Rebuild is triggered automatically once the inserted count exceeds
    /// this fraction of configured capacity. Default 0.70.
    #[serde(default = "default_rebuild_load_factor")]
    pub rebuild_load_factor: f64,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            bloom_capacity: default_bloom_capacity(),
            bloom_fp_rate: default_bloom_fp_rate(),
            rebuild_load_factor: default_rebuild_load_factor(),
        }
    }
}

fn default_bloom_capacity() -> usize {
    100_000_000
}

fn default_bloom_fp_rate() -> f64 {
    0.01
}

fn default_rebuild_load_factor() -> f64 {
    0.70
}
