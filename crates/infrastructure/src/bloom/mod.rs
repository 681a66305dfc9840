pub mod atomic_bloom;
pub mod pre_filter;

pub use atomic_bloom::AtomicBloom;
pub use pre_filter::BloomPreFilter;
