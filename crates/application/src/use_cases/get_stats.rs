use crate::ports::PolicyEnginePort;
use dnsward_domain::StatsSnapshot;
use std::sync::Arc;

/// Retrieve a point-in-time snapshot of the pipeline's observability
/// counters.
pub struct GetStatsUseCase {
    engine: Arc<dyn PolicyEnginePort>,
}

impl GetStatsUseCase {
    pub fn new(engine: Arc<dyn PolicyEnginePort>) -> Self {
        Self { engine }
    }

    pub fn execute(&self) -> StatsSnapshot {
        self.engine.stats()
    }
}
