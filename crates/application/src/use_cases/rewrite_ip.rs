use crate::ports::PolicyEnginePort;
use std::net::IpAddr;
use std::sync::Arc;

/// Post-resolution IP rewrite entry point.
///
/// Callers must only invoke this for PASSTHROUGH, DNS_ALLOW, or DNS_BLOCK
/// answers that actually came back from an upstream resolver. TERMINATE
/// answers are synthesized locally (see DESIGN.md) and never passed through
/// here.
pub struct RewriteIpUseCase {
    engine: Arc<dyn PolicyEnginePort>,
}

impl RewriteIpUseCase {
    pub fn new(engine: Arc<dyn PolicyEnginePort>) -> Self {
        Self { engine }
    }

    pub async fn execute(&self, addr: IpAddr) -> IpAddr {
        self.engine.rewrite_ip(addr).await
    }
}
