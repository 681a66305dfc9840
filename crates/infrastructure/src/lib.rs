//! DNSWard Infrastructure Layer
//!
//! Concrete adapters for the ports declared in `dnsward-application`: the
//! SQLite-backed persistent store gateway, the atomic Bloom pre-filter, the
//! sharded LRU disposition cache, the Aho-Corasick-bucketed regex engine,
//! the IP rewriter, the policy engine that wires them together, and the
//! SIGHUP-driven refresh controller.

pub mod bloom;
pub mod cache;
pub mod ip_rewrite;
pub mod pipeline;
pub mod refresh;
pub mod regex_engine;
pub mod store;

pub use pipeline::PolicyEngine;
pub use refresh::RefreshController;
pub use store::PersistentStoreGateway;
