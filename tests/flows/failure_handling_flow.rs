//! §4.2 / §7 failure-handling behavior: a store that cannot be opened
//! degrades the whole engine to passthrough for every query, without
//! panicking or blocking startup.

#[path = "../common/mod.rs"]
mod common;

use common::build_engine_with_missing_store;
use dnsward_application::ports::PolicyEnginePort;
use dnsward_domain::{DispositionKind, Name};

#[tokio::test]
async fn missing_store_degrades_to_passthrough_for_every_query() {
    let engine = build_engine_with_missing_store().await;

    for raw in ["anything.example", "would-have-been-blocked.example"] {
        let result = engine.classify(&Name::normalize(raw).unwrap(), 0).await;
        assert_eq!(result.kind, DispositionKind::Passthrough);
    }

    // Every stage past the Bloom gate still attempts its own store probe
    // and fails, so a degraded gateway accrues one store_errors increment
    // per query rather than a single one at startup.
    let snapshot = engine.stats();
    assert!(snapshot.store_errors > 0);
}

#[tokio::test]
async fn reload_against_a_missing_store_does_not_panic() {
    let engine = build_engine_with_missing_store().await;
    // warm_up() logs and continues rather than propagating; reload() must
    // behave the same way on a degraded gateway.
    assert!(engine.reload().await.is_ok());
}
