//! End-to-end scenarios from spec.md §8.2, run against a real SQLite store
//! through the full `PolicyEngine` (LRU -> regex -> Bloom/exact -> alias ->
//! wildcard -> allow -> block -> passthrough).

#[path = "../common/mod.rs"]
mod common;

use common::build_store;
use dnsward_application::ports::PolicyEnginePort;
use dnsward_domain::{DispositionKind, Name};
use std::net::{IpAddr, Ipv4Addr};

#[tokio::test]
async fn scenario_1_exact_block_does_not_imply_wildcard() {
    let store = build_store(&["INSERT INTO block_exact (key) VALUES ('ads.example.com')"]).await;
    let engine = common::build_engine(&store).await;

    let hit = engine.classify(&Name::normalize("ads.example.com").unwrap(), 0).await;
    assert_eq!(hit.kind, DispositionKind::Terminate);

    let miss = engine
        .classify(&Name::normalize("sub.ads.example.com").unwrap(), 0)
        .await;
    assert_eq!(miss.kind, DispositionKind::Passthrough);
}

#[tokio::test]
async fn scenario_2_wildcard_matches_subdomains_not_lookalikes() {
    let store =
        build_store(&["INSERT INTO block_wildcard (key) VALUES ('telemetry.microsoft.com')"]).await;
    let engine = common::build_engine(&store).await;

    let exact = engine
        .classify(&Name::normalize("telemetry.microsoft.com").unwrap(), 0)
        .await;
    assert_eq!(exact.kind, DispositionKind::DnsBlock);

    let sub = engine
        .classify(&Name::normalize("v10.telemetry.microsoft.com").unwrap(), 0)
        .await;
    assert_eq!(sub.kind, DispositionKind::DnsBlock);

    let lookalike = engine
        .classify(&Name::normalize("telemetrymicrosoft.com").unwrap(), 0)
        .await;
    assert_eq!(lookalike.kind, DispositionKind::Passthrough);
}

#[tokio::test]
async fn scenario_3_alias_preserves_subdomain_then_falls_through_to_passthrough() {
    let store =
        build_store(&["INSERT INTO domain_alias (key, target) VALUES ('intel.com', 'keweon.center')"])
            .await;
    let engine = common::build_engine(&store).await;

    let result = engine.classify(&Name::normalize("www.intel.com").unwrap(), 0).await;
    assert_eq!(result.kind, DispositionKind::Passthrough);
    assert_eq!(result.alias_target.unwrap().as_str(), "www.keweon.center");
}

#[tokio::test]
async fn scenario_4_circular_alias_truncates_at_max_depth() {
    let store = build_store(&[
        "INSERT INTO domain_alias (key, target) VALUES ('a.com', 'b.com')",
        "INSERT INTO domain_alias (key, target) VALUES ('b.com', 'a.com')",
    ])
    .await;
    let engine = common::build_engine(&store).await;

    let before = engine.stats().alias_depth_truncations;
    let result = engine.classify(&Name::normalize("x.a.com").unwrap(), 0).await;
    assert_eq!(result.kind, DispositionKind::Passthrough);
    let after = engine.stats().alias_depth_truncations;
    assert_eq!(after, before + 1);
}

#[tokio::test]
async fn scenario_5_regex_block() {
    let store = build_store(&[
        r"INSERT INTO block_regex (pattern) VALUES ('^ads[0-9]+\.example\.com$')",
    ])
    .await;
    let engine = common::build_engine(&store).await;

    let hit = engine.classify(&Name::normalize("ads7.example.com").unwrap(), 0).await;
    assert_eq!(hit.kind, DispositionKind::Terminate);

    let miss = engine.classify(&Name::normalize("ads.example.com").unwrap(), 0).await;
    assert_eq!(miss.kind, DispositionKind::Passthrough);
}

#[tokio::test]
async fn scenario_6_block_exact_outranks_fqdn_dns_allow() {
    let store = build_store(&[
        "INSERT INTO block_exact (key) VALUES ('evil.test')",
        "INSERT INTO fqdn_dns_allow (key) VALUES ('evil.test')",
    ])
    .await;
    let engine = common::build_engine(&store).await;

    let result = engine.classify(&Name::normalize("evil.test").unwrap(), 0).await;
    assert_eq!(result.kind, DispositionKind::Terminate);
}

#[tokio::test]
async fn scenario_7_ip_rewrite_applies_once_leaves_others_untouched() {
    let store =
        build_store(&["INSERT INTO ip_rewrite_v4 (key, target) VALUES ('203.0.113.50', '10.20.0.10')"])
            .await;
    let engine = common::build_engine(&store).await;

    let rewritten = engine
        .rewrite_ip(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 50)))
        .await;
    assert_eq!(rewritten, IpAddr::V4(Ipv4Addr::new(10, 20, 0, 10)));

    let untouched = engine
        .rewrite_ip(IpAddr::V4(Ipv4Addr::new(198, 51, 100, 1)))
        .await;
    assert_eq!(untouched, IpAddr::V4(Ipv4Addr::new(198, 51, 100, 1)));
}

#[tokio::test]
async fn fqdn_dns_block_outranks_nothing_lower_but_still_blocks() {
    let store = build_store(&["INSERT INTO fqdn_dns_block (key) VALUES ('spyware.example')"]).await;
    let engine = common::build_engine(&store).await;

    let result = engine
        .classify(&Name::normalize("host.spyware.example").unwrap(), 0)
        .await;
    assert_eq!(result.kind, DispositionKind::DnsBlock);
}

#[tokio::test]
async fn fqdn_dns_allow_applies_when_nothing_else_matches() {
    let store = build_store(&["INSERT INTO fqdn_dns_allow (key) VALUES ('trusted.example')"]).await;
    let engine = common::build_engine(&store).await;

    let result = engine
        .classify(&Name::normalize("trusted.example").unwrap(), 0)
        .await;
    assert_eq!(result.kind, DispositionKind::DnsAllow);
}

#[tokio::test]
async fn repeated_classify_is_served_from_cache_after_first_miss() {
    let store = build_store(&["INSERT INTO block_exact (key) VALUES ('cached.example')"]).await;
    let engine = common::build_engine(&store).await;
    let name = Name::normalize("cached.example").unwrap();

    let _first = engine.classify(&name, 0).await;
    let before_hits = engine.stats().lru_hits;
    let second = engine.classify(&name, 0).await;
    let after_hits = engine.stats().lru_hits;

    assert_eq!(second.kind, DispositionKind::Terminate);
    assert_eq!(after_hits, before_hits + 1);
}
