//! Name normalization.
//!
//! `normalize` is the single entry point the policy pipeline calls before
//! doing anything else. It is a pure function: no I/O, no locks, no
//! allocation beyond the returned `Name` itself.

use compact_str::CompactString;
use std::fmt;

/// Maximum total length of a domain name, per RFC 1035.
const MAX_NAME_LEN: usize = 253;
/// Maximum length of a single label, per RFC 1035.
const MAX_LABEL_LEN: usize = 63;

/// A normalized, canonical domain name: lower-case ASCII, no trailing dot,
/// within RFC 1035 length limits.
///
/// `Name` never re-validates once constructed — the only way to build one
/// outside this module is [`Name::from_normalized_unchecked`], which callers
/// must only use for values already known to be canonical (e.g. table keys
/// read back from the store, which are always stored lower-case).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(CompactString);

impl Name {
    /// Normalize a raw question name into a canonical `Name`.
    ///
    /// Returns `None` if the name is empty, contains a non-ASCII byte, any
    /// label violates RFC 1035 length/charset, or the total length (after
    /// stripping a trailing dot) exceeds 253 bytes. IDNA pre-processing is
    /// assumed already done by the DNS front-end; punycode (`xn--...`)
    /// labels are accepted opaquely since they are plain ASCII.
    pub fn normalize(raw: &str) -> Option<Name> {
        if raw.is_empty() {
            return None;
        }

        let stripped = raw.strip_suffix('.').unwrap_or(raw);
        if stripped.is_empty() || stripped.len() > MAX_NAME_LEN {
            return None;
        }
        if !stripped.is_ascii() {
            return None;
        }

        for label in stripped.split('.') {
            if label.is_empty() || label.len() > MAX_LABEL_LEN {
                return None;
            }
            if !label.bytes().all(is_label_byte) {
                return None;
            }
        }

        Some(Name(CompactString::new(stripped).to_ascii_lowercase().into()))
    }

    /// Wrap an already-canonical string without re-validating it.
    ///
    /// Used for domain-table keys read from the persistent store, which are
    /// stored lower-case already and therefore trusted as-is.
    pub fn from_normalized_unchecked(s: impl Into<CompactString>) -> Name {
        Name(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of labels, i.e. `.`-separated components.
    pub fn label_count(&self) -> usize {
        self.0.split('.').count()
    }

    /// Returns `true` iff `self == key` or `self` ends with `"." + key`
    /// (the wildcard-style match predicate shared by every subdomain-aware
    /// table).
    pub fn matches_wildcard(&self, key: &str) -> bool {
        let s = self.0.as_str();
        if s == key {
            return true;
        }
        match s.len().checked_sub(key.len() + 1) {
            Some(prefix_len) => {
                s.as_bytes()[prefix_len] == b'.' && &s[prefix_len + 1..] == key
            }
            None => false,
        }
    }

    /// Strip a matched wildcard suffix `"." + key` (or the whole string if
    /// `self == key`), returning the remaining subdomain prefix (possibly
    /// empty). Caller must have already confirmed `matches_wildcard(key)`.
    pub fn strip_wildcard_suffix<'a>(&'a self, key: &str) -> &'a str {
        let s = self.0.as_str();
        if s == key {
            return "";
        }
        let cut = s.len() - key.len() - 1;
        &s[..cut]
    }
}

#[inline]
fn is_label_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_trailing_dot() {
        let n = Name::normalize("Example.COM.").unwrap();
        assert_eq!(n.as_str(), "example.com");
    }

    #[test]
    fn rejects_empty() {
        assert!(Name::normalize("").is_none());
        assert!(Name::normalize(".").is_none());
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(Name::normalize("café.com").is_none());
    }

    #[test]
    fn rejects_label_too_long() {
        let label = "a".repeat(64);
        let name = format!("{label}.com");
        assert!(Name::normalize(&name).is_none());
    }

    #[test]
    fn rejects_total_too_long() {
        // 4 labels of 63 'a' separated by dots exceeds 253 once joined with a TLD.
        let label = "a".repeat(63);
        let name = format!("{label}.{label}.{label}.{label}.com");
        assert!(Name::normalize(&name).is_none());
    }

    #[test]
    fn rejects_empty_label() {
        assert!(Name::normalize("foo..com").is_none());
    }

    #[test]
    fn accepts_punycode_opaquely() {
        let n = Name::normalize("xn--caf-dma.com").unwrap();
        assert_eq!(n.as_str(), "xn--caf-dma.com");
    }

    #[test]
    fn wildcard_match_exact_and_subdomain() {
        let n = Name::normalize("foo.com").unwrap();
        assert!(n.matches_wildcard("foo.com"));
        let n2 = Name::normalize("a.foo.com").unwrap();
        assert!(n2.matches_wildcard("foo.com"));
        let n3 = Name::normalize("barfoo.com").unwrap();
        assert!(!n3.matches_wildcard("foo.com"));
    }

    #[test]
    fn strip_wildcard_suffix_yields_prefix() {
        let n = Name::normalize("www.intel.com").unwrap();
        assert!(n.matches_wildcard("intel.com"));
        assert_eq!(n.strip_wildcard_suffix("intel.com"), "www");

        let n2 = Name::normalize("intel.com").unwrap();
        assert_eq!(n2.strip_wildcard_suffix("intel.com"), "");
    }
}
