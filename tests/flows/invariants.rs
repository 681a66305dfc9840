//! Property-style checks from spec.md §8.1, run as direct enumeration
//! rather than through a property-testing crate (see SPEC_FULL.md §3.4
//! for why this repo doesn't pull in proptest/quickcheck).

#[path = "../common/mod.rs"]
mod common;

use common::build_store;
use dnsward_application::ports::PolicyEnginePort;
use dnsward_domain::{DispositionKind, Name};

/// P1: any name absent from every table passes through.
#[tokio::test]
async fn p1_unknown_names_pass_through() {
    let store = build_store(&["INSERT INTO block_exact (key) VALUES ('blocked.example')"]).await;
    let engine = common::build_engine(&store).await;

    for raw in ["never-seen.example", "another.one.example", "zzz.test"] {
        let result = engine.classify(&Name::normalize(raw).unwrap(), 0).await;
        assert_eq!(result.kind, DispositionKind::Passthrough, "{raw} should pass through");
    }
}

/// P2: every name in block_exact terminates, regardless of other tables
/// also matching it.
#[tokio::test]
async fn p2_block_exact_always_terminates() {
    let store = build_store(&[
        "INSERT INTO block_exact (key) VALUES ('multi.example')",
        "INSERT INTO block_wildcard (key) VALUES ('multi.example')",
        "INSERT INTO fqdn_dns_allow (key) VALUES ('multi.example')",
    ])
    .await;
    let engine = common::build_engine(&store).await;

    let result = engine.classify(&Name::normalize("multi.example").unwrap(), 0).await;
    assert_eq!(result.kind, DispositionKind::Terminate);
}

/// P3: a block_regex match wins over every later-priority table.
#[tokio::test]
async fn p3_block_regex_outranks_everything_lower() {
    let store = build_store(&[
        r"INSERT INTO block_regex (pattern) VALUES ('^regexed\.example$')",
        "INSERT INTO fqdn_dns_allow (key) VALUES ('regexed.example')",
    ])
    .await;
    let engine = common::build_engine(&store).await;

    let result = engine.classify(&Name::normalize("regexed.example").unwrap(), 0).await;
    assert_eq!(result.kind, DispositionKind::Terminate);
}

/// P5: wildcard match is exactly `N == K || N.ends_with("." + K)` — in
/// particular a same-suffix-but-different-label name does not match.
#[tokio::test]
async fn p5_wildcard_match_is_exact_not_substring() {
    let store = build_store(&["INSERT INTO block_wildcard (key) VALUES ('foo.com')"]).await;
    let engine = common::build_engine(&store).await;

    let exact = engine.classify(&Name::normalize("foo.com").unwrap(), 0).await;
    assert_eq!(exact.kind, DispositionKind::DnsBlock);

    let subdomain = engine.classify(&Name::normalize("a.foo.com").unwrap(), 0).await;
    assert_eq!(subdomain.kind, DispositionKind::DnsBlock);

    let lookalike = engine.classify(&Name::normalize("barfoo.com").unwrap(), 0).await;
    assert_eq!(lookalike.kind, DispositionKind::Passthrough);
}

/// P6: repeated classify() calls for the same name return the same
/// disposition kind and matched rule until an explicit reload.
#[tokio::test]
async fn p6_cache_is_idempotent_until_reload() {
    let store = build_store(&["INSERT INTO block_exact (key) VALUES ('stable.example')"]).await;
    let engine = common::build_engine(&store).await;
    let name = Name::normalize("stable.example").unwrap();

    let first = engine.classify(&name, 0).await;
    for _ in 0..10 {
        let again = engine.classify(&name, 0).await;
        assert_eq!(again.kind, first.kind);
        assert_eq!(again.matched_rule, first.matched_rule);
    }

    engine.reload().await.unwrap();
    let after_reload = engine.classify(&name, 0).await;
    assert_eq!(after_reload.kind, first.kind);
}

/// P9: the IP rewriter is the identity for every address outside its
/// tables, and applies the configured mapping exactly once for addresses
/// inside them (no transitive chaining even if a rewritten target itself
/// has a mapping).
#[tokio::test]
async fn p9_ip_rewrite_has_no_chaining() {
    let store = build_store(&[
        "INSERT INTO ip_rewrite_v4 (key, target) VALUES ('10.0.0.1', '10.0.0.2')",
        "INSERT INTO ip_rewrite_v4 (key, target) VALUES ('10.0.0.2', '10.0.0.3')",
    ])
    .await;
    let engine = common::build_engine(&store).await;

    use std::net::{IpAddr, Ipv4Addr};
    let once = engine.rewrite_ip(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))).await;
    assert_eq!(once, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)));

    let identity = engine.rewrite_ip(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))).await;
    assert_eq!(identity, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)));
}

/// P4: alias expansion preserves the subdomain prefix for an arbitrary
/// set of prefixes, landing on a table that doesn't itself match so the
/// final kind is observably a PASSTHROUGH with the expected alias target.
#[tokio::test]
async fn p4_alias_expansion_preserves_subdomain_prefix() {
    let store =
        build_store(&["INSERT INTO domain_alias (key, target) VALUES ('source.test', 'target.test')"])
            .await;
    let engine = common::build_engine(&store).await;

    for prefix in ["www", "api", "a.b.c"] {
        let raw = format!("{prefix}.source.test");
        let result = engine.classify(&Name::normalize(&raw).unwrap(), 0).await;
        assert_eq!(
            result.alias_target.unwrap().as_str(),
            format!("{prefix}.target.test")
        );
    }

    let no_prefix = engine.classify(&Name::normalize("source.test").unwrap(), 0).await;
    assert_eq!(no_prefix.alias_target.unwrap().as_str(), "target.test");
}
