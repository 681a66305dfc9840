//! DNSWard Domain Layer
//!
//! Pure types and rules for the policy engine: names, tables, dispositions,
//! configuration and the shared error type. Nothing in this crate touches
//! disk, the network, or a lock.

pub mod config;
pub mod disposition;
pub mod errors;
pub mod name;
pub mod stats;

pub use config::{CliOverrides, Config, ConfigError};
pub use disposition::{Disposition, DispositionKind, TableId};
pub use errors::PolicyError;
pub use name::Name;
pub use stats::{PipelineStats, StatsSnapshot};
