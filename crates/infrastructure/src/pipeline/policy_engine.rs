use crate::bloom::BloomPreFilter;
use crate::cache::LruDispositionCache;
use crate::pipeline::error_rate_limiter::ErrorLogLimiter;
use crate::regex_engine::{RegexBucketEngine, RegexMatchPath};
use crate::store::PersistentStoreGateway;
use async_trait::async_trait;
use dnsward_application::ports::PolicyEnginePort;
use dnsward_domain::config::Config;
use dnsward_domain::{Disposition, Name, PipelineStats, PolicyError, StatsSnapshot, TableId};
use std::future::Future;
use std::net::IpAddr;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{info, warn};

use crate::ip_rewrite::IpRewriter;

/// The concrete policy engine: owns the persistent store gateway, Bloom
/// pre-filter, LRU disposition cache, and regex bucket engine, and
/// implements the priority chain that turns a normalized name into a
/// [`Disposition`].
pub struct PolicyEngine {
    store: Arc<PersistentStoreGateway>,
    bloom: BloomPreFilter,
    cache: LruDispositionCache,
    regex: RegexBucketEngine,
    ip_rewriter: IpRewriter,
    stats: Arc<PipelineStats>,
    alias_max_depth: u8,
    verbose_per_query: bool,
    error_limiter: ErrorLogLimiter,
}

impl PolicyEngine {
    pub async fn new(config: &Config) -> Self {
        let store = Arc::new(PersistentStoreGateway::open(&config.store).await);
        let stats = Arc::new(PipelineStats::new());
        let bloom = BloomPreFilter::new(&config.bloom);
        let cache = LruDispositionCache::new(config.cache.lru_capacity, config.cache.shards);
        let regex = RegexBucketEngine::new(&config.regex);
        let ip_rewriter = IpRewriter::new(store.clone(), stats.clone());

        let engine = PolicyEngine {
            store,
            bloom,
            cache,
            regex,
            ip_rewriter,
            stats,
            alias_max_depth: config.pipeline.alias_max_depth,
            verbose_per_query: config.logging.verbose_per_query,
            error_limiter: ErrorLogLimiter::new(config.logging.error_log_rate_per_sec),
        };

        engine.warm_up().await;
        engine
    }

    async fn warm_up(&self) {
        match self.store.load_all_exact_keys().await {
            Ok(keys) => {
                info!(count = keys.len(), "building bloom pre-filter from block_exact");
                self.bloom.rebuild(&keys);
            }
            Err(e) => {
                if self.error_limiter.allow(e.kind()) {
                    warn!(error = %e, "failed to warm up bloom pre-filter; continuing without it");
                }
            }
        }

        match self.store.load_all_regex_patterns().await {
            Ok(patterns) => {
                if let Err(e) = self.regex.load(&patterns) {
                    if self.error_limiter.allow(e.kind()) {
                        warn!(error = %e, "failed to load block_regex patterns; regex stage disabled");
                    }
                }
            }
            Err(e) => {
                if self.error_limiter.allow(e.kind()) {
                    warn!(error = %e, "failed to warm up regex bucket engine; continuing without it");
                }
            }
        }
    }

    /// Classify `name`, boxed so the alias-expansion recursion (step 4 of
    /// the priority chain re-entering step 1) can be expressed as an
    /// `async fn` without an infinitely-sized future.
    fn classify_boxed<'a>(
        &'a self,
        name: &'a Name,
        alias_depth: u8,
    ) -> Pin<Box<dyn Future<Output = Disposition> + Send + 'a>> {
        Box::pin(self.classify_inner(name, alias_depth))
    }

    /// Classify `name`, then optionally emit the verbose-per-query log line.
    /// Every call site (the public entry point and recursive alias
    /// expansion alike) goes through here, so each classification — at
    /// every alias hop — gets exactly one structured line when enabled.
    async fn classify_inner(&self, name: &Name, alias_depth: u8) -> Disposition {
        let disposition = self.classify_core(name, alias_depth).await;
        if self.verbose_per_query {
            info!(
                name = %name,
                alias_depth,
                kind = ?disposition.kind,
                matched_rule = disposition.matched_rule.map(|t| t.as_str()),
                "query classified"
            );
        }
        disposition
    }

    async fn classify_core(&self, name: &Name, alias_depth: u8) -> Disposition {
        PipelineStats::incr(&self.stats.total_queries);

        // 1. LRU cache.
        if let Some(cached) = self.cache.get(name) {
            PipelineStats::incr(&self.stats.lru_hits);
            return cached;
        }
        PipelineStats::incr(&self.stats.lru_misses);

        // 2. block_regex.
        if let Some(path) = self.regex.find_match(name.as_str()) {
            match path {
                RegexMatchPath::Bucket => PipelineStats::incr(&self.stats.regex_bucket_hits),
                RegexMatchPath::Residual => PipelineStats::incr(&self.stats.regex_residual_hits),
            }
            PipelineStats::incr(&self.stats.block_regex_hits);
            let disposition = Disposition::terminate(TableId::BlockRegex);
            self.cache.put(name, &disposition);
            return disposition;
        }

        // 3. block_exact, Bloom-gated.
        PipelineStats::incr(&self.stats.bloom_checks);
        if self.bloom.check(name.as_str()) {
            PipelineStats::incr(&self.stats.bloom_positive);
            match self.store.block_exact_contains(name).await {
                Ok(true) => {
                    PipelineStats::incr(&self.stats.block_exact_hits);
                    let disposition = Disposition::terminate(TableId::BlockExact);
                    self.cache.put(name, &disposition);
                    return disposition;
                }
                Ok(false) => {}
                Err(e) => return self.store_error_passthrough(e),
            }
        }

        // 4. domain_alias, wildcard-style match with subdomain preservation.
        match self.store.domain_alias_lookup(name).await {
            Ok(Some(alias_match)) => {
                PipelineStats::incr(&self.stats.domain_alias_hits);
                PipelineStats::incr(&self.stats.alias_expansions);
                let pre = name.strip_wildcard_suffix(&alias_match.key);
                let expanded_str = if pre.is_empty() {
                    alias_match.target.clone()
                } else {
                    format!("{pre}.{}", alias_match.target)
                };
                let expanded = Name::from_normalized_unchecked(expanded_str);

                if alias_depth >= self.alias_max_depth {
                    warn!(name = %name, alias_depth, "alias recursion depth exceeded; truncating to passthrough");
                    PipelineStats::incr(&self.stats.alias_depth_truncations);
                    let disposition = Disposition::passthrough();
                    self.cache.put(name, &disposition);
                    return disposition;
                }

                let mut resolved = self.classify_boxed(&expanded, alias_depth + 1).await;
                resolved.alias_target = Some(expanded);
                self.cache.put(name, &resolved);
                return resolved;
            }
            Ok(None) => {}
            Err(e) => return self.store_error_passthrough(e),
        }

        // 5. block_wildcard.
        match self.store.block_wildcard_lookup(name).await {
            Ok(Some(_)) => {
                PipelineStats::incr(&self.stats.block_wildcard_hits);
                let disposition = Disposition::dns_block(TableId::BlockWildcard);
                self.cache.put(name, &disposition);
                return disposition;
            }
            Ok(None) => {}
            Err(e) => return self.store_error_passthrough(e),
        }

        // 6. fqdn_dns_allow.
        match self.store.fqdn_dns_allow_lookup(name).await {
            Ok(Some(_)) => {
                PipelineStats::incr(&self.stats.fqdn_dns_allow_hits);
                let disposition = Disposition::dns_allow(TableId::FqdnDnsAllow);
                self.cache.put(name, &disposition);
                return disposition;
            }
            Ok(None) => {}
            Err(e) => return self.store_error_passthrough(e),
        }

        // 7. fqdn_dns_block.
        match self.store.fqdn_dns_block_lookup(name).await {
            Ok(Some(_)) => {
                PipelineStats::incr(&self.stats.fqdn_dns_block_hits);
                let disposition = Disposition::dns_block(TableId::FqdnDnsBlock);
                self.cache.put(name, &disposition);
                return disposition;
            }
            Ok(None) => {}
            Err(e) => return self.store_error_passthrough(e),
        }

        // 8. Passthrough.
        PipelineStats::incr(&self.stats.passthrough_total);
        let disposition = Disposition::passthrough();
        self.cache.put(name, &disposition);
        disposition
    }

    /// A transient store-probe error downgrades the whole query to
    /// PASSTHROUGH without caching the result — a stale cache miss must
    /// never synthesize a wrong block.
    fn store_error_passthrough(&self, err: PolicyError) -> Disposition {
        if self.error_limiter.allow(err.kind()) {
            warn!(error = %err, "store probe failed; downgrading query to passthrough");
        }
        PipelineStats::incr(&self.stats.store_errors);
        PipelineStats::incr(&self.stats.passthrough_total);
        Disposition::passthrough()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn regex_pattern_count(&self) -> usize {
        self.regex.pattern_count()
    }
}

#[async_trait]
impl PolicyEnginePort for PolicyEngine {
    async fn classify(&self, name: &Name, alias_depth: u8) -> Disposition {
        self.classify_inner(name, alias_depth).await
    }

    async fn rewrite_ip(&self, addr: IpAddr) -> IpAddr {
        self.ip_rewriter.rewrite(addr).await
    }

    async fn reload(&self) -> Result<(), PolicyError> {
        info!("policy engine reload started");
        self.warm_up().await;
        self.cache.clear();
        info!("policy engine reload completed");
        Ok(())
    }

    fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
