use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free Bloom filter over atomic 64-bit words.
///
/// `check` and `set` both take `&self` — concurrent readers and a single
/// background builder can share one instance without any lock, at the cost
/// of the usual Bloom false-positive rate. Hashing uses the default SipHash
/// (`DefaultHasher`) salted by hash index, which is adequate here since the
/// filter is advisory: a false positive only costs one wasted exact-table
/// probe, never a wrong disposition.
pub struct AtomicBloom {
    bits: Vec<AtomicU64>,
    num_bits: usize,
    num_hashes: usize,
    inserted: AtomicU64,
}

impl AtomicBloom {
    pub fn new(capacity: usize, fp_rate: f64) -> Self {
        let capacity = capacity.max(1);
        let num_bits = Self::optimal_num_bits(capacity, fp_rate);
        let num_hashes = Self::optimal_num_hashes(capacity, num_bits);
        let num_words = num_bits.div_ceil(64);
        let bits = (0..num_words).map(|_| AtomicU64::new(0)).collect();
        Self {
            bits,
            num_bits,
            num_hashes,
            inserted: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn check(&self, key: &str) -> bool {
        self.hash_positions(key).all(|bit_idx| {
            let word_idx = bit_idx / 64;
            let bit_pos = bit_idx % 64;
            let word = self.bits[word_idx].load(Ordering::Relaxed);
            (word & (1u64 << bit_pos)) != 0
        })
    }

    #[inline]
    pub fn set(&self, key: &str) {
        for bit_idx in self.hash_positions(key) {
            let word_idx = bit_idx / 64;
            let bit_pos = bit_idx % 64;
            self.bits[word_idx].fetch_or(1u64 << bit_pos, Ordering::Relaxed);
        }
        self.inserted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn clear(&self) {
        for word in &self.bits {
            word.store(0, Ordering::Relaxed);
        }
        self.inserted.store(0, Ordering::Relaxed);
    }

    pub fn inserted_count(&self) -> u64 {
        self.inserted.load(Ordering::Relaxed)
    }

    /// Build a filter pre-loaded with every key in `keys`, sized for
    /// `keys.len()` at the given false-positive rate.
    pub fn build(keys: &[String], fp_rate: f64) -> Self {
        Self::build_sized(keys, keys.len(), fp_rate)
    }

    /// Like [`Self::build`], but the filter is sized for `capacity` rather
    /// than `keys.len()` (used when the caller has already decided the
    /// configured capacity is too small for the actual key count).
    pub fn build_sized(keys: &[String], capacity: usize, fp_rate: f64) -> Self {
        let bloom = Self::new(capacity, fp_rate);
        for key in keys {
            bloom.set(key);
        }
        bloom
    }

    fn hash_positions<'a>(&'a self, key: &'a str) -> impl Iterator<Item = usize> + 'a {
        (0..self.num_hashes).map(move |i| {
            use std::collections::hash_map::DefaultHasher;
            let mut hasher = DefaultHasher::new();
            key.hash(&mut hasher);
            i.hash(&mut hasher);
            (hasher.finish() as usize) % self.num_bits
        })
    }

    fn optimal_num_bits(capacity: usize, fp_rate: f64) -> usize {
        let m = -1.0 * (capacity as f64) * fp_rate.ln() / (2.0_f64.ln().powi(2));
        m.ceil() as usize
    }

    fn optimal_num_hashes(capacity: usize, num_bits: usize) -> usize {
        let k = (num_bits as f64 / capacity as f64) * 2.0_f64.ln();
        k.ceil().max(1.0) as usize
    }
}
