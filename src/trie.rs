//! Domain pattern index.
//!
//! Patterns are stored as a trie keyed by domain labels from right to left
//! (TLD first). An optional `:port` suffix is the first key, so port-bound
//! patterns live in their own subtree. Each node can end an exact pattern
//! and can carry a wildcard that absorbs one or more remaining labels.
//!
//! Lookup prefers the exact child at every level and falls back to the
//! nearest wildcard on the way back up, so `example.com` beats
//! `*.example.com`, which in turn beats `*.com`.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::Result;
use crate::pattern::{canonical_pattern, validate_pattern};

#[derive(Debug, Clone, Default)]
struct Node {
    children: HashMap<Box<str>, Node>,
    /// Canonical pattern that ends exactly here
    pattern: Option<Box<str>>,
    /// Canonical `*.` pattern covering everything below here
    wildcard: Option<Box<str>>,
}

impl Node {
    fn find<'a, I>(&self, mut keys: I) -> Option<&str>
    where
        I: Iterator<Item = &'a str>,
    {
        let Some(key) = keys.next() else {
            return self.pattern.as_deref();
        };

        // At least one key remains from here on, so the wildcard may apply.
        self.children
            .get(key)
            .and_then(|child| child.find(keys))
            .or(self.wildcard.as_deref())
    }
}

/// Trie of host patterns with label-scoped wildcard support.
///
/// Insert-only: there is no removal, rebuild instead.
#[derive(Debug, Clone, Default)]
pub struct DomainTrie {
    root: Node,
    len: usize,
}

impl DomainTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a host pattern. The pattern is validated, then stored in its
    /// canonical spelling; an invalid pattern leaves the trie untouched.
    /// Spellings with the same canonical form share one entry.
    pub fn insert(&mut self, pattern: &str) -> Result<()> {
        validate_pattern(pattern)?;
        let pattern = canonical_pattern(pattern);

        let (host, port) = split_port(&pattern);
        let (wildcard, host) = match host.strip_prefix('*') {
            Some(rest) => (true, rest.strip_prefix('.').unwrap_or(rest)),
            None => (false, host),
        };

        let mut node = &mut self.root;
        for key in segments(host, port) {
            node = node.children.entry(key.into()).or_default();
        }

        let slot = if wildcard {
            &mut node.wildcard
        } else {
            &mut node.pattern
        };
        if slot.replace(pattern.as_str().into()).is_none() {
            self.len += 1;
        }

        Ok(())
    }

    /// Find the most specific pattern matching `hostname`.
    ///
    /// Returns the canonical pattern string.
    pub fn lookup(&self, hostname: &str) -> Option<&str> {
        let hostname = to_lowercase(hostname);
        let (host, port) = split_port(&hostname);
        self.root.find(segments(host, port))
    }

    /// Check whether any pattern matches `hostname`
    pub fn contains(&self, hostname: &str) -> bool {
        self.lookup(hostname).is_some()
    }

    /// Number of stored patterns
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the trie is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Lower-case `s`, only allocating when it has uppercase or non-ASCII bytes.
fn to_lowercase(s: &str) -> Cow<'_, str> {
    if s.bytes().all(|b| b.is_ascii() && !b.is_ascii_uppercase()) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.to_lowercase())
    }
}

/// Split a trailing `:port` off `s`. The port keeps its colon so it can never
/// collide with a label. Text with more than one colon (IPv6) is not split.
fn split_port(s: &str) -> (&str, Option<&str>) {
    match s.rfind(':') {
        Some(i)
            if i + 1 < s.len()
                && !s[..i].contains(':')
                && s[i + 1..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            (&s[..i], Some(&s[i..]))
        }
        _ => (s, None),
    }
}

/// Trie keys for a host: the port first, then labels right to left.
fn segments<'a>(host: &'a str, port: Option<&'a str>) -> impl Iterator<Item = &'a str> {
    let labels = (!host.is_empty()).then(|| host.rsplit('.'));
    port.into_iter().chain(labels.into_iter().flatten())
}
