//! Configuration for the policy engine.
//!
//! One struct per concern: `store`, `cache`, `bloom`, `regex`, `pipeline`,
//! `logging`, aggregated into a single [`Config`] by `root`.

pub mod bloom;
pub mod cache;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod regex;
pub mod root;
pub mod store;

pub use bloom::BloomConfig;
pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use pipeline::PipelineConfig;
pub use regex::RegexConfig;
pub use root::{CliOverrides, Config};
pub use store::StoreConfig;
