//! Host ACL - hostname matching against allow/deny lists
//!
//! This library resolves whether a hostname (optionally with port) matches a
//! configured list of:
//! - Exact hostnames (`example.com`)
//! - Wildcard subdomains (`*.example.com`)
//! - IP literals (`10.0.0.1`)
//! - Any of the above bound to a port (`example.com:8080`, `*:443`)
//!
//! Each pattern maps to the addresses it resolves to. Lookups walk a
//! reversed-label trie in O(number of labels).
//!
//! # Example
//!
//! ```rust
//! use host_acl_r::{Host, Hosts, OptionalHosts};
//!
//! let hosts = Hosts::new([
//!     ("example.com", "1.1.1.1".parse::<Host>().unwrap()),
//!     ("*.example.com", "2.2.2.2:8080".parse::<Host>().unwrap()),
//! ])
//! .unwrap();
//!
//! // Exact beats wildcard
//! assert_eq!(hosts.match_host("EXAMPLE.com").unwrap().to_string(), "1.1.1.1");
//! assert_eq!(hosts.match_host("api.example.com").unwrap().port, 8080);
//! assert!(hosts.match_host("example.org").is_none());
//!
//! // JSON form, `null` meaning "not configured"
//! let json = br#"{"*.internal": ["10.0.0.1", "10.0.0.2"]}"#;
//! let optional = OptionalHosts::from_json(json).unwrap();
//! assert_eq!(optional.match_host("db.internal").unwrap().ips.len(), 2);
//! assert!(!OptionalHosts::from_json(b"null").unwrap().is_present());
//! ```
//!
//! # Pattern Syntax
//!
//! ```text
//! [*[.]][label(.label)*][:port]
//! ```
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `example.com` | `example.com` only |
//! | `*.example.com` | `a.example.com`, `a.b.example.com`, not `example.com` |
//! | `*` | any non-empty host |
//! | `example.com:8080` | `example.com:8080` only |
//! | `*:443` | any non-empty host on port 443 |
//!
//! Matching is case-insensitive. The most specific pattern wins.

pub mod error;
pub mod hosts;
pub mod null_hosts;
pub mod pattern;
pub mod shared;
pub mod trie;
pub mod types;

// Re-export commonly used items
pub use error::{HostsError, HostsErrorKind, Result};
pub use hosts::{Hosts, HostsBuilder};
pub use null_hosts::OptionalHosts;
pub use pattern::{canonical_pattern, is_valid_pattern, validate_pattern};
pub use shared::SharedHosts;
pub use trie::DomainTrie;
pub use types::Host;
