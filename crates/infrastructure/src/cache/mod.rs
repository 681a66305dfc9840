pub mod disposition_cache;

pub use disposition_cache::LruDispositionCache;
