use crate::ports::PolicyEnginePort;
use dnsward_domain::PolicyError;
use std::sync::Arc;

/// Invoked by the Refresh Controller on receipt of the reload signal.
pub struct ReloadUseCase {
    engine: Arc<dyn PolicyEnginePort>,
}

impl ReloadUseCase {
    pub fn new(engine: Arc<dyn PolicyEnginePort>) -> Self {
        Self { engine }
    }

    pub async fn execute(&self) -> Result<(), PolicyError> {
        self.engine.reload().await
    }
}
