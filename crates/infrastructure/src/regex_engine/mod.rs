pub mod bucket_engine;
pub mod literal_extract;

pub use bucket_engine::{RegexBucketEngine, RegexMatchPath};
