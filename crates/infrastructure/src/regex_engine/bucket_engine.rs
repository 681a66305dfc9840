use super::literal_extract::extract_literal;
use aho_corasick::AhoCorasick;
use arc_swap::ArcSwap;
use dnsward_domain::config::RegexConfig;
use dnsward_domain::PolicyError;
use fancy_regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Which path inside [`RegexIndex`] produced a match, for stats attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexMatchPath {
    /// Matched a pattern reached through the Aho-Corasick literal bucket.
    Bucket,
    /// Matched a pattern with no usable literal, tested unconditionally.
    Residual,
}

struct CompiledPattern {
    regex: Regex,
    source: String,
}

/// One compiled snapshot of the `block_regex` pattern set.
///
/// Patterns with an extractable literal substring are bucketed behind a
/// single Aho-Corasick automaton: a name is only ever tested against the
/// (usually small) subset of patterns whose literal bucket it could
/// possibly match, instead of against every loaded pattern. Patterns with
/// no usable literal (too short, or entirely metacharacters) sit in the
/// residual bucket and are tested unconditionally.
struct RegexIndex {
    patterns: Vec<CompiledPattern>,
    literal_automaton: Option<AhoCorasick>,
    /// AhoCorasick pattern id -> indices into `patterns` sharing that literal.
    literal_buckets: Vec<Vec<usize>>,
    residual: Vec<usize>,
}

impl RegexIndex {
    fn empty() -> Self {
        RegexIndex {
            patterns: Vec::new(),
            literal_automaton: None,
            literal_buckets: Vec::new(),
            residual: Vec::new(),
        }
    }

    fn find_match(&self, name: &str) -> Option<RegexMatchPath> {
        if self.patterns.is_empty() {
            return None;
        }
        let mut tested = vec![false; self.patterns.len()];

        if let Some(ac) = &self.literal_automaton {
            for m in ac.find_iter(name) {
                for &idx in &self.literal_buckets[m.pattern().as_usize()] {
                    if !tested[idx] {
                        tested[idx] = true;
                        if self.patterns[idx].regex.is_match(name).unwrap_or(false) {
                            return Some(RegexMatchPath::Bucket);
                        }
                    }
                }
            }
        }

        for &idx in &self.residual {
            if self.patterns[idx].regex.is_match(name).unwrap_or(false) {
                return Some(RegexMatchPath::Residual);
            }
        }

        None
    }
}

/// Hot-swappable compiled view of the `block_regex` table.
pub struct RegexBucketEngine {
    index: ArcSwap<RegexIndex>,
    warn_pattern_count: usize,
    hard_cap: usize,
}

impl RegexBucketEngine {
    pub fn new(cfg: &RegexConfig) -> Self {
        Self {
            index: ArcSwap::from_pointee(RegexIndex::empty()),
            warn_pattern_count: cfg.warn_pattern_count,
            hard_cap: cfg.hard_cap,
        }
    }

    /// Test `name` against the loaded pattern set, reporting which path
    /// produced the match (bucketed via the literal pre-filter, or
    /// residual) so callers can attribute it correctly in stats.
    #[inline]
    pub fn find_match(&self, name: &str) -> Option<RegexMatchPath> {
        self.index.load().find_match(name)
    }

    #[inline]
    pub fn is_match(&self, name: &str) -> bool {
        self.find_match(name).is_some()
    }

    /// Compile `raw_patterns` into a fresh index and swap it in.
    ///
    /// Refuses (returns `Err` and leaves the current index in place) if
    /// `raw_patterns.len()` exceeds the configured hard cap — a pattern
    /// set that large is almost certainly a misconfiguration, and
    /// compiling it would stall every in-flight query behind a very long
    /// rebuild.
    pub fn load(&self, raw_patterns: &[String]) -> Result<(), PolicyError> {
        if raw_patterns.len() > self.hard_cap {
            return Err(PolicyError::PatternCompileError(format!(
                "block_regex has {} patterns, exceeding the configured hard cap of {}",
                raw_patterns.len(),
                self.hard_cap
            )));
        }
        if raw_patterns.len() > self.warn_pattern_count {
            warn!(
                count = raw_patterns.len(),
                warn_threshold = self.warn_pattern_count,
                "block_regex pattern count exceeds warn threshold"
            );
        }

        let mut patterns = Vec::with_capacity(raw_patterns.len());
        let mut literal_groups: HashMap<String, Vec<usize>> = HashMap::new();
        let mut residual = Vec::new();

        for raw in raw_patterns {
            // Query names are always lower-cased by `Name::normalize` before
            // they ever reach this engine, but stored patterns are free-form
            // operator input; compile case-insensitively so a pattern like
            // `Example\.com$` still matches.
            let regex = match RegexBuilder::new(raw).case_insensitive(true).build() {
                Ok(r) => r,
                Err(e) => {
                    warn!(pattern = %raw, error = %e, "block_regex pattern failed to compile; skipping");
                    continue;
                }
            };
            let idx = patterns.len();
            patterns.push(CompiledPattern {
                regex,
                source: raw.clone(),
            });

            match extract_literal(raw) {
                Some(literal) => literal_groups.entry(literal).or_default().push(idx),
                None => residual.push(idx),
            }
        }

        let (literal_automaton, literal_buckets) = if literal_groups.is_empty() {
            (None, Vec::new())
        } else {
            let literals: Vec<&String> = literal_groups.keys().collect();
            let buckets: Vec<Vec<usize>> = literals
                .iter()
                .map(|lit| literal_groups[*lit].clone())
                .collect();
            let automaton = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(&literals)
                .map_err(|e| PolicyError::PatternCompileError(e.to_string()))?;
            (Some(automaton), buckets)
        };

        self.index.store(Arc::new(RegexIndex {
            patterns,
            literal_automaton,
            literal_buckets,
            residual,
        }));

        Ok(())
    }

    pub fn pattern_count(&self) -> usize {
        self.index.load().patterns.len()
    }

    pub fn patterns(&self) -> Vec<String> {
        self.index.load().patterns.iter().map(|p| p.source.clone()).collect()
    }
}
