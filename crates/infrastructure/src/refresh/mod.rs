//! SIGHUP-triggered reload.
//!
//! The persistent store is maintained by a process outside this one; the
//! only signal this daemon gets that the tables changed is an operator
//! sending SIGHUP. `RefreshController` just owns the signal listener and
//! calls back into the policy engine's own `reload()`, which does the
//! actual rebuild-and-swap work.

use dnsward_application::ports::PolicyEnginePort;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

pub struct RefreshController<P: PolicyEnginePort + 'static> {
    engine: Arc<P>,
}

impl<P: PolicyEnginePort + 'static> RefreshController<P> {
    pub fn new(engine: Arc<P>) -> Self {
        Self { engine }
    }

    /// Run forever, reloading the engine on every SIGHUP. Returns only if
    /// installing the signal handler itself fails (e.g. the platform has
    /// no `signal_unix` support), which is treated as fatal by the caller.
    pub async fn run(self) -> std::io::Result<()> {
        let mut hangup = signal(SignalKind::hangup())?;
        loop {
            hangup.recv().await;
            info!("SIGHUP received; reloading policy store");
            if let Err(e) = self.engine.reload().await {
                error!(error = %e, "policy store reload failed; continuing with previous state");
            }
        }
    }
}
