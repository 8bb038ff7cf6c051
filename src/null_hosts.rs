//! JSON form of host sets.
//!
//! ```text
//! null
//! | { "<pattern>": "<ip>[:<port>]" | ["<ip>[:<port>]", ...], ... }
//! ```
//!
//! [`OptionalHosts`] maps `null` to the absent state. A present set encodes
//! one string per single-IP entry, a list for multi-IP entries, and drops
//! entries without IPs.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{HostsError, Result};
use crate::hosts::Hosts;
use crate::types::Host;

/// A host set that may be absent (`null`).
///
/// There is no partially built state: either no configuration was given,
/// or every pattern validated.
#[derive(Debug, Clone, Default)]
pub struct OptionalHosts {
    hosts: Option<Hosts>,
}

impl OptionalHosts {
    /// Build a present set from `pattern -> Host` pairs
    pub fn new<I, K>(source: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Host)>,
        K: AsRef<str>,
    {
        Ok(Self::from(Hosts::new(source)?))
    }

    /// The absent state
    pub fn absent() -> Self {
        Self::default()
    }

    /// Check whether a host set is present
    pub fn is_present(&self) -> bool {
        self.hosts.is_some()
    }

    /// The host set, if present
    pub fn hosts(&self) -> Option<&Hosts> {
        self.hosts.as_ref()
    }

    /// Take the host set out of the wrapper
    pub fn into_inner(self) -> Option<Hosts> {
        self.hosts
    }

    /// Match against the set; an absent set matches nothing
    pub fn match_host(&self, hostname: &str) -> Option<Host> {
        self.hosts.as_ref()?.match_host(hostname)
    }

    /// Decode from JSON bytes
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(data)?;
        Self::from_value(value)
    }

    /// Decode from a parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::absent());
        }
        let map: Map<String, Value> = serde_json::from_value(value)?;
        Ok(Self::from(hosts_from_map(map)?))
    }

    /// Encode to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Hosts> for OptionalHosts {
    fn from(hosts: Hosts) -> Self {
        Self { hosts: Some(hosts) }
    }
}

impl From<Option<Hosts>> for OptionalHosts {
    fn from(hosts: Option<Hosts>) -> Self {
        Self { hosts }
    }
}

fn hosts_from_map(map: Map<String, Value>) -> Result<Hosts> {
    let mut source = Vec::with_capacity(map.len());

    for (key, value) in map {
        let host = match &value {
            Value::String(address) => address.parse::<Host>()?,
            Value::Array(items) => {
                let addresses = items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .ok_or_else(|| HostsError::InvalidValueType(key.clone()))
                    })
                    .collect::<Result<Vec<&str>>>()?;
                Host::from_addresses(&key, addresses)?
            }
            _ => return Err(HostsError::InvalidValueType(key)),
        };
        source.push((key, host));
    }

    Hosts::new(source)
}

impl Serialize for Hosts {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<(&str, &Host)> = self
            .iter()
            .filter(|(_, host)| !host.is_empty())
            .collect();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (pattern, host) in entries {
            map.serialize_entry(pattern, host)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Hosts {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        hosts_from_map(map).map_err(serde::de::Error::custom)
    }
}

impl Serialize for OptionalHosts {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.hosts {
            Some(hosts) => serializer.serialize_some(hosts),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for OptionalHosts {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
