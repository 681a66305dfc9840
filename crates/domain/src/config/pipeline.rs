use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Policy pipeline configuration: alias recursion limit, sinkhole answers,
/// and upstream targets for each non-terminal disposition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Maximum alias recursion depth before aborting to PASSTHROUGH
    /// (`alias-max-depth`). Default 4.
    #[serde(default = "default_alias_max_depth")]
    pub alias_max_depth: u8,

    /// Synthetic A answer for TERMINATE (`sinkhole-v4`).
    #[serde(default = "default_sinkhole_v4")]
    pub sinkhole_v4: Ipv4Addr,

    /// Synthetic AAAA answer for TERMINATE (`sinkhole-v6`).
    #[serde(default = "default_sinkhole_v6")]
    pub sinkhole_v6: Ipv6Addr,

    /// Upstream target for DNS_BLOCK (`dns-block-resolver`).
    #[serde(default = "default_dns_block_resolver")]
    pub dns_block_resolver: String,

    /// Upstream target for DNS_ALLOW (`dns-allow-resolver`).
    #[serde(default = "default_dns_allow_resolver")]
    pub dns_allow_resolver: String,

    /// Upstream target for PASSTHROUGH (`default-upstream`).
    #[serde(default = "default_default_upstream")]
    pub default_upstream: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alias_max_depth: default_alias_max_depth(),
            sinkhole_v4: default_sinkhole_v4(),
            sinkhole_v6: default_sinkhole_v6(),
            dns_block_resolver: default_dns_block_resolver(),
            dns_allow_resolver: default_dns_allow_resolver(),
            default_upstream: default_default_upstream(),
        }
    }
}

fn default_alias_max_depth() -> u8 {
    4
}

fn default_sinkhole_v4() -> Ipv4Addr {
    Ipv4Addr::new(0, 0, 0, 0)
}

fn default_sinkhole_v6() -> Ipv6Addr {
    Ipv6Addr::UNSPECIFIED
}

fn default_dns_block_resolver() -> String {
    "127.0.0.1:5354".to_string()
}

fn default_dns_allow_resolver() -> String {
    "1.1.1.1:53".to_string()
}

fn default_default_upstream() -> String {
    "1.1.1.1:53".to_string()
}
