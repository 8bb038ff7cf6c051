//! Integration tests for Hosts / OptionalHosts through the public API

use std::collections::HashMap;

use host_acl_r::{Host, Hosts, HostsError, OptionalHosts};

fn host(text: &str) -> Host {
    text.parse().unwrap()
}

/// A representative allow list: exact, wildcard, IP literal and port-bound entries
fn get_allow_list() -> HashMap<String, Host> {
    [
        ("example.com", "10.0.0.1"),
        ("*.example.com", "10.0.0.2"),
        ("Mixed-Case.Example.ORG", "10.0.0.3"),
        ("*.deep.internal", "10.0.0.4:8080"),
        ("192.168.1.10", "10.0.0.5"),
        ("api.test:8443", "[2001:db8::1]:443"),
        ("*:9999", "127.0.0.1"),
        ("localhost", "::1"),
    ]
    .into_iter()
    .map(|(pattern, address)| (pattern.to_string(), host(address)))
    .collect()
}

/// Flip the case of every other ASCII letter
fn case_permute(s: &str) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| {
            if i % 2 == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

#[test]
fn test_every_literal_pattern_matches_itself() {
    let source = get_allow_list();
    let hosts = Hosts::new(source.clone()).unwrap();

    for (pattern, value) in &source {
        if pattern.starts_with('*') {
            continue;
        }
        assert_eq!(
            hosts.match_host(pattern).as_ref(),
            Some(value),
            "{pattern} should match itself"
        );
        assert_eq!(
            hosts.match_host(&case_permute(pattern)).as_ref(),
            Some(value),
            "{} should match case-insensitively",
            case_permute(pattern)
        );
    }
}

#[test]
fn test_wildcard_absorbs_subdomains_only() {
    let hosts = Hosts::new([("*.example.com", host("1.1.1.1"))]).unwrap();

    assert_eq!(hosts.match_host("a.example.com"), Some(host("1.1.1.1")));
    assert_eq!(hosts.match_host("a.b.example.com"), Some(host("1.1.1.1")));
    assert_eq!(hosts.match_host("example.com"), None);
    assert_eq!(hosts.match_host("badexample.com"), None);
}

#[test]
fn test_specificity() {
    let hosts = Hosts::new([
        ("example.com", host("1.1.1.1")),
        ("*.example.com", host("2.2.2.2")),
    ])
    .unwrap();

    assert_eq!(hosts.match_host("example.com"), Some(host("1.1.1.1")));
    assert_eq!(hosts.match_host("sub.example.com"), Some(host("2.2.2.2")));
}

#[test]
fn test_nested_wildcards_pick_deepest() {
    let hosts = Hosts::new([
        ("*.com", host("1.1.1.1")),
        ("*.example.com", host("2.2.2.2")),
        ("*.eu.example.com", host("3.3.3.3")),
    ])
    .unwrap();

    assert_eq!(hosts.match_host("other.com"), Some(host("1.1.1.1")));
    assert_eq!(hosts.match_host("www.example.com"), Some(host("2.2.2.2")));
    assert_eq!(hosts.match_host("cdn.eu.example.com"), Some(host("3.3.3.3")));
    assert_eq!(hosts.match_host("eu.example.com"), Some(host("2.2.2.2")));
}

#[test]
fn test_case_insensitive_match() {
    let hosts = Hosts::new(get_allow_list()).unwrap();

    assert_eq!(hosts.match_host("EXAMPLE.com"), hosts.match_host("example.com"));
    assert_eq!(
        hosts.match_host("mixed-case.example.org"),
        Some(host("10.0.0.3"))
    );
}

#[test]
fn test_port_bound_entries() {
    let hosts = Hosts::new(get_allow_list()).unwrap();

    assert_eq!(hosts.match_host("api.test:8443"), Some(host("[2001:db8::1]:443")));
    assert_eq!(hosts.match_host("api.test"), None);
    assert_eq!(hosts.match_host("api.test:443"), None);
    assert_eq!(hosts.match_host("random.host:9999"), Some(host("127.0.0.1")));
    assert_eq!(
        hosts.match_host("x.deep.internal"),
        Some(host("10.0.0.4:8080"))
    );
}

#[test]
fn test_no_match_is_not_an_error() {
    let empty = Hosts::new(HashMap::<String, Host>::new()).unwrap();
    assert_eq!(empty.match_host("example.com"), None);

    let hosts = Hosts::new(get_allow_list()).unwrap();
    assert_eq!(hosts.match_host("unrelated.net"), None);
    assert_eq!(hosts.match_host(""), None);
    assert_eq!(hosts.match_host("not a hostname!"), None);
    assert_eq!(hosts.match_host("192.168.1.11"), None);
}

#[test]
fn test_invalid_pattern_rejects_whole_set() {
    let mut source = get_allow_list();
    source.insert("exa mple.com".to_string(), host("1.1.1.1"));

    match Hosts::new(source) {
        Err(HostsError::InvalidPatternSyntax(pattern)) => assert_eq!(pattern, "exa mple.com"),
        other => panic!("expected InvalidPatternSyntax, got {:?}", other),
    }
}

#[test]
fn test_json_round_trip_preserves_matching() {
    let original = OptionalHosts::new([
        ("example.com", host("1.1.1.1")),
        ("*.example.com", host("2.2.2.2")),
        ("10.1.1.1", host("3.3.3.3")),
        ("svc.local", host("4.4.4.4")),
    ])
    .unwrap();

    let encoded = original.to_json().unwrap();
    let decoded = OptionalHosts::from_json(encoded.as_bytes()).unwrap();

    for query in [
        "example.com",
        "a.example.com",
        "10.1.1.1",
        "svc.local",
        "missing.org",
    ] {
        assert_eq!(
            decoded.match_host(query),
            original.match_host(query),
            "{query} should match identically after round trip"
        );
    }
}

#[test]
fn test_json_conflicting_ports() {
    let err =
        OptionalHosts::from_json(br#"{"a.com": ["1.1.1.1:80", "2.2.2.2:81"]}"#).unwrap_err();
    assert!(matches!(err, HostsError::ConflictingPorts(ref key) if key == "a.com"));
}

#[test]
fn test_json_shared_port_applies_to_all() {
    let hosts =
        OptionalHosts::from_json(br#"{"a.com": ["1.1.1.1", "2.2.2.2:53", "3.3.3.3:53"]}"#)
            .unwrap();

    let found = hosts.match_host("a.com").unwrap();
    assert_eq!(found.port, 53);
    assert_eq!(found.to_strings(), vec!["1.1.1.1:53", "2.2.2.2:53", "3.3.3.3:53"]);
}

#[test]
fn test_json_null() {
    let absent = OptionalHosts::from_json(b"null").unwrap();
    assert!(!absent.is_present());
    assert!(absent.hosts().is_none());
    assert_eq!(absent.to_json().unwrap(), "null");
}

#[test]
fn test_json_serde_round_trip_via_hosts() {
    let hosts: Hosts = serde_json::from_str(r#"{"*.Example.com": "1.2.3.4:80"}"#).unwrap();
    assert_eq!(
        serde_json::to_string(&hosts).unwrap(),
        r#"{"*.example.com":"1.2.3.4:80"}"#
    );

    let err = serde_json::from_str::<Hosts>(r#"{"a.com": true}"#).unwrap_err();
    assert!(err.to_string().contains("a.com"), "got: {}", err);
}

#[test]
fn test_equivalent_wildcard_spellings_are_one_entry() {
    // The later spelling wins, every time, regardless of map ordering.
    for _ in 0..200 {
        let hosts = Hosts::new(vec![
            ("*.example.com", host("1.1.1.1")),
            ("*example.com", host("2.2.2.2")),
        ])
        .unwrap();
        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts.match_host("a.example.com"), Some(host("2.2.2.2")));
    }

    let hosts = Hosts::new(vec![("*", host("1.1.1.1")), ("*.", host("2.2.2.2"))]).unwrap();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts.match_host("anything"), Some(host("2.2.2.2")));
}

#[test]
fn test_json_wildcard_spellings_encode_canonically() {
    let hosts = OptionalHosts::from_json(br#"{"*example.com": "1.1.1.1"}"#).unwrap();
    assert_eq!(hosts.match_host("a.example.com"), Some(host("1.1.1.1")));
    assert_eq!(hosts.to_json().unwrap(), r#"{"*.example.com":"1.1.1.1"}"#);
}
