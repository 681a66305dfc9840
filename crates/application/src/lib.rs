//! DNSWard Application Layer
//!
//! Ports describe what the infrastructure layer must provide; use cases are
//! the thin, side-effect-free orchestration the CLI/front-end calls into.
//! Nothing here knows about SQLite, `ArcSwap`, or any other concrete
//! mechanism — those live in `dnsward-infrastructure`.

pub mod ports;
pub mod use_cases;

pub use ports::PolicyEnginePort;
