use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{HostsError, Result};

/// Resolved target of a host pattern: one or more IPs sharing an optional port.
///
/// A port of `0` means the entry carries no port and the caller's port applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Host {
    /// Resolved IP addresses, in configuration order
    pub ips: Vec<IpAddr>,
    /// Port shared by all IPs (0 = no port)
    pub port: u16,
}

impl Host {
    /// Create a new Host from IPs and a port
    pub fn new(ips: Vec<IpAddr>, port: u16) -> Self {
        Self { ips, port }
    }

    /// Create a Host for a single IP without port
    pub fn from_ip(ip: IpAddr) -> Self {
        Self {
            ips: vec![ip],
            port: 0,
        }
    }

    /// Check whether the entry has no IPs
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    /// Check whether the entry pins a port
    pub fn has_port(&self) -> bool {
        self.port != 0
    }

    /// Render each IP as `ip` or `ip:port` (IPv6 bracketed when a port is set).
    pub fn to_strings(&self) -> Vec<String> {
        self.ips.iter().map(|ip| self.render(*ip)).collect()
    }

    /// Socket addresses for every IP. The entry's own port wins over
    /// `default_port` when it is set.
    pub fn socket_addrs(&self, default_port: u16) -> Vec<SocketAddr> {
        let port = if self.has_port() {
            self.port
        } else {
            default_port
        };
        self.ips.iter().map(|ip| SocketAddr::new(*ip, port)).collect()
    }

    fn render(&self, ip: IpAddr) -> String {
        if self.has_port() {
            SocketAddr::new(ip, self.port).to_string()
        } else {
            ip.to_string()
        }
    }

    /// Merge several address strings configured under one key.
    ///
    /// The first non-zero port becomes the entry's port; any later,
    /// different non-zero port is rejected.
    pub fn from_addresses<'a, I>(key: &str, addresses: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut merged = Host::default();
        for address in addresses {
            let host: Host = address.parse()?;
            if merged.port == 0 {
                merged.port = host.port;
            } else if host.port != 0 && host.port != merged.port {
                return Err(HostsError::ConflictingPorts(key.to_string()));
            }
            merged.ips.extend(host.ips);
        }
        Ok(merged)
    }
}

impl From<IpAddr> for Host {
    fn from(ip: IpAddr) -> Self {
        Self::from_ip(ip)
    }
}

impl From<SocketAddr> for Host {
    fn from(addr: SocketAddr) -> Self {
        Self {
            ips: vec![addr.ip()],
            port: addr.port(),
        }
    }
}

impl FromStr for Host {
    type Err = HostsError;

    /// Parse `ip`, `ip:port` or `[ipv6]:port`. Host names are not accepted.
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Host::from(addr));
        }
        s.parse::<IpAddr>()
            .map(Host::from_ip)
            .map_err(|_| HostsError::InvalidAddressFormat(s.to_string()))
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ip) in self.ips.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&self.render(*ip))?;
        }
        Ok(())
    }
}

/// Wire form of a Host: one address string or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum RawHost {
    One(String),
    Many(Vec<String>),
}

impl Serialize for Host {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.ips.as_slice() {
            [ip] => serializer.serialize_str(&self.render(*ip)),
            _ => self.to_strings().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Host {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawHost::deserialize(deserializer)? {
            RawHost::One(address) => address.parse::<Host>().map_err(serde::de::Error::custom),
            RawHost::Many(addresses) => {
                // No key is known here; the map-level decoder names it.
                Host::from_addresses("", addresses.iter().map(String::as_str)).map_err(|err| {
                    match err {
                        HostsError::ConflictingPorts(_) => {
                            serde::de::Error::custom("conflicting ports in address list")
                        }
                        other => serde::de::Error::custom(other),
                    }
                })
            }
        }
    }
}
