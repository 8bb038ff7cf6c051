use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{HostsError, Result};

/// Regex for `[*[.]][label(.label)*][:port]` host patterns.
/// Labels are alphanumeric with inner hyphens, ports are 1-5 digits.
static HOST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\*\.?)?((([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9]))?(:[0-9]{1,5})?$",
    )
    .expect("HOST_PATTERN: hardcoded regex is invalid")
});

/// Validate a host pattern against the pattern grammar.
///
/// The whole input must match; a partial match is rejected.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    match HOST_PATTERN.find(pattern) {
        Some(m) if m.start() == 0 && m.end() == pattern.len() => Ok(()),
        _ => Err(HostsError::InvalidPatternSyntax(pattern.to_string())),
    }
}

/// Check whether a host pattern is valid.
pub fn is_valid_pattern(pattern: &str) -> bool {
    validate_pattern(pattern).is_ok()
}

/// Canonical spelling of a valid pattern.
///
/// Lower-cased, with the wildcard written `*.` in front of labels and a bare
/// `*` in front of a port or nothing. `*example.com` and `*.example.com`
/// (likewise `*` and `*.`) name the same entry.
pub fn canonical_pattern(pattern: &str) -> String {
    let lower = pattern.to_lowercase();
    match lower.strip_prefix('*') {
        Some(rest) => {
            let rest = rest.strip_prefix('.').unwrap_or(rest);
            if rest.is_empty() || rest.starts_with(':') {
                format!("*{}", rest)
            } else {
                format!("*.{}", rest)
            }
        }
        None => lower,
    }
}
