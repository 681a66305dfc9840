//! The classification result produced by the policy pipeline.

use crate::name::Name;

/// Which rule table produced a match, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    Lru,
    BlockRegex,
    BlockExact,
    DomainAlias,
    BlockWildcard,
    FqdnDnsAllow,
    FqdnDnsBlock,
}

impl TableId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableId::Lru => "lru",
            TableId::BlockRegex => "block_regex",
            TableId::BlockExact => "block_exact",
            TableId::DomainAlias => "domain_alias",
            TableId::BlockWildcard => "block_wildcard",
            TableId::FqdnDnsAllow => "fqdn_dns_allow",
            TableId::FqdnDnsBlock => "fqdn_dns_block",
        }
    }
}

/// The five possible outcomes of `classify()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispositionKind {
    /// Synthesize a sinkhole answer; never forwarded upstream.
    Terminate,
    /// Forward to the configured block-resolver.
    DnsBlock,
    /// Forward to the configured allow-resolver.
    DnsAllow,
    /// Restart resolution against a rewritten name.
    Alias,
    /// Forward to the default upstream, unchanged.
    Passthrough,
}

/// The full classification result for one query.
///
/// Cheap to clone: `alias_target` is the only heap-backed field, and is
/// `None` in the overwhelming majority of dispositions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disposition {
    pub kind: DispositionKind,
    /// Set iff `kind == Alias`: the name the front-end should re-resolve.
    pub alias_target: Option<Name>,
    /// Which table produced the decision, if any (absent for cache hits
    /// that don't re-walk the pipeline, and for plain passthrough).
    pub matched_rule: Option<TableId>,
}

impl Disposition {
    pub fn terminate(matched_rule: TableId) -> Self {
        Disposition {
            kind: DispositionKind::Terminate,
            alias_target: None,
            matched_rule: Some(matched_rule),
        }
    }

    pub fn dns_block(matched_rule: TableId) -> Self {
        Disposition {
            kind: DispositionKind::DnsBlock,
            alias_target: None,
            matched_rule: Some(matched_rule),
        }
    }

    pub fn dns_allow(matched_rule: TableId) -> Self {
        Disposition {
            kind: DispositionKind::DnsAllow,
            alias_target: None,
            matched_rule: Some(matched_rule),
        }
    }

    pub fn alias(expanded: Name) -> Self {
        Disposition {
            kind: DispositionKind::Alias,
            alias_target: Some(expanded),
            matched_rule: Some(TableId::DomainAlias),
        }
    }

    pub fn passthrough() -> Self {
        Disposition {
            kind: DispositionKind::Passthrough,
            alias_target: None,
            matched_rule: None,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.kind == DispositionKind::Passthrough
    }
}
