use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;

use log::{debug, warn};

use crate::error::Result;
use crate::pattern::{canonical_pattern, validate_pattern};
use crate::trie::DomainTrie;
use crate::types::Host;

/// Set of host patterns mapped to their resolved addresses.
///
/// Built in one pass and immutable afterwards, so shared `&Hosts` lookups
/// need no locking.
#[derive(Debug, Clone, Default)]
pub struct Hosts {
    trie: DomainTrie,
    source: HashMap<String, Host>,
}

impl Hosts {
    /// Build a host set from `pattern -> Host` pairs.
    ///
    /// Patterns are stored in canonical form (see [`canonical_pattern`]);
    /// when two keys share a canonical form the later one wins. Fails on the
    /// first invalid pattern and returns nothing.
    pub fn new<I, K>(source: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Host)>,
        K: AsRef<str>,
    {
        let source = canonical_keys(source)?;

        let mut trie = DomainTrie::new();
        for pattern in source.keys() {
            trie.insert(pattern)?;
        }

        debug!("built host set with {} patterns", trie.len());

        Ok(Self { trie, source })
    }

    /// Match a hostname (optionally `host:port`) against the set.
    ///
    /// Returns a copy of the value stored under the best matching pattern:
    /// an exact pattern wins over a wildcard, and a deeper wildcard wins
    /// over a shallower one.
    pub fn match_host(&self, hostname: &str) -> Option<Host> {
        let pattern = self.trie.lookup(hostname)?;
        self.source.get(pattern).cloned()
    }

    /// Resolve `host` on `port` to socket addresses.
    ///
    /// Tries `host:port` first, then the bare `host`. The entry's own port
    /// replaces `port` when it has one.
    pub fn match_addr(&self, host: &str, port: u16) -> Option<Vec<SocketAddr>> {
        self.match_host(&format!("{}:{}", host, port))
            .or_else(|| self.match_host(host))
            .map(|remote| remote.socket_addrs(port))
    }

    /// Value stored under a pattern (any spelling), no wildcard expansion
    pub fn get(&self, pattern: &str) -> Option<&Host> {
        self.source.get(&canonical_pattern(pattern))
    }

    /// Iterate over `(pattern, host)` pairs in pattern order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Host)> {
        let sorted: BTreeMap<&str, &Host> = self
            .source
            .iter()
            .map(|(pattern, host)| (pattern.as_str(), host))
            .collect();
        sorted.into_iter()
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

fn canonical_keys<I, K>(source: I) -> Result<HashMap<String, Host>>
where
    I: IntoIterator<Item = (K, Host)>,
    K: AsRef<str>,
{
    let mut result: HashMap<String, Host> = HashMap::new();
    let mut spellings: HashMap<String, String> = HashMap::new();

    for (key, host) in source {
        let key = key.as_ref();
        validate_pattern(key)?;
        let canonical = canonical_pattern(key);
        if let Some(previous) = spellings.insert(canonical.clone(), key.to_string()) {
            warn!(
                "host pattern '{}' overrides '{}' (both are '{}')",
                key, previous, canonical
            );
        }
        result.insert(canonical, host);
    }

    Ok(result)
}

/// Incremental builder for [`Hosts`].
#[derive(Debug, Clone, Default)]
pub struct HostsBuilder {
    entries: Vec<(String, Host)>,
}

impl HostsBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern, chaining
    pub fn with_host(mut self, pattern: impl Into<String>, host: Host) -> Self {
        self.insert(pattern, host);
        self
    }

    /// Add a pattern
    pub fn insert(&mut self, pattern: impl Into<String>, host: Host) -> &mut Self {
        self.entries.push((pattern.into(), host));
        self
    }

    /// Validate every pattern and build the set
    pub fn build(self) -> Result<Hosts> {
        Hosts::new(self.entries)
    }
}
