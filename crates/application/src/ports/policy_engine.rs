use async_trait::async_trait;
use dnsward_domain::{Disposition, Name, PolicyError, StatsSnapshot};
use std::net::IpAddr;

/// The single entry point the DNS front-end (out of scope here) calls into.
///
/// Implemented by exactly one concrete type in `dnsward-infrastructure`
/// (`PolicyEngine`), which owns the persistent store gateway, Bloom
/// pre-filter, LRU disposition cache, regex bucket engine, and IP rewriter
/// as private internals — callers never see those pieces individually.
#[async_trait]
pub trait PolicyEnginePort: Send + Sync {
    /// Classify an already-normalized name.
    ///
    /// `alias_depth` starts at 0 for a front-end-originated query; recursive
    /// calls made internally during alias expansion increment it. Never
    /// returns an `Err` — all internal failures collapse to
    /// `Disposition::passthrough()`.
    async fn classify(&self, name: &Name, alias_depth: u8) -> Disposition;

    /// Post-resolution IP rewrite. Identity outside the
    /// `ip_rewrite_v4`/`ip_rewrite_v6` tables.
    async fn rewrite_ip(&self, addr: IpAddr) -> IpAddr;

    /// Recompile the regex bucket engine's pattern set and clear the Bloom
    /// and LRU caches. Triggered by SIGHUP.
    async fn reload(&self) -> Result<(), PolicyError>;

    /// Point-in-time snapshot of the observability counters.
    fn stats(&self) -> StatsSnapshot;
}
