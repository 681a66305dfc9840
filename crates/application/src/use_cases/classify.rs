use crate::ports::PolicyEnginePort;
use dnsward_domain::{Disposition, Name};
use std::sync::Arc;
use tracing::debug;

/// Entry point the DNS front-end calls for every inbound question name.
///
/// Normalizes the raw, possibly-malformed question name before the engine
/// ever sees it. Normalization failure is itself a disposition, not an
/// error: an unparseable name yields pass-through rather than a classify
/// call.
pub struct ClassifyUseCase {
    engine: Arc<dyn PolicyEnginePort>,
}

impl ClassifyUseCase {
    pub fn new(engine: Arc<dyn PolicyEnginePort>) -> Self {
        Self { engine }
    }

    /// Normalize `raw` and classify it, starting a fresh alias chain
    /// (`alias_depth = 0`).
    pub async fn execute(&self, raw: &str) -> Disposition {
        match Name::normalize(raw) {
            Some(name) => self.engine.classify(&name, 0).await,
            None => {
                debug!(raw, "name normalization failed; passthrough");
                Disposition::passthrough()
            }
        }
    }
}
