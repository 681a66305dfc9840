use crate::store::PersistentStoreGateway;
use dnsward_domain::PipelineStats;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::warn;

/// Post-resolution IP rewriter.
///
/// Consulted only after an upstream resolver has actually returned an
/// address (PASSTHROUGH, DNS_ALLOW, or DNS_BLOCK). Looks the address up in
/// `ip_rewrite_v4`/`ip_rewrite_v6` and substitutes the configured target;
/// an address absent from both tables, or a store in a degraded state, is
/// returned unchanged. The result of one rewrite is never fed back through
/// the tables again — rewriting never chains.
pub struct IpRewriter {
    store: Arc<PersistentStoreGateway>,
    stats: Arc<PipelineStats>,
}

impl IpRewriter {
    pub fn new(store: Arc<PersistentStoreGateway>, stats: Arc<PipelineStats>) -> Self {
        Self { store, stats }
    }

    pub async fn rewrite(&self, addr: IpAddr) -> IpAddr {
        let result = match addr {
            IpAddr::V4(v4) => match self.store.ip_rewrite_v4_lookup(v4).await {
                Ok(Some(target)) => {
                    PipelineStats::incr(&self.stats.ip_rewrites_v4);
                    Some(IpAddr::V4(target))
                }
                Ok(None) => None,
                Err(e) => {
                    warn!(error = %e, "ip_rewrite_v4 lookup failed; returning address unchanged");
                    PipelineStats::incr(&self.stats.store_errors);
                    None
                }
            },
            IpAddr::V6(v6) => match self.store.ip_rewrite_v6_lookup(v6).await {
                Ok(Some(target)) => {
                    PipelineStats::incr(&self.stats.ip_rewrites_v6);
                    Some(IpAddr::V6(target))
                }
                Ok(None) => None,
                Err(e) => {
                    warn!(error = %e, "ip_rewrite_v6 lookup failed; returning address unchanged");
                    PipelineStats::incr(&self.stats.store_errors);
                    None
                }
            },
        };

        result.unwrap_or(addr)
    }
}
