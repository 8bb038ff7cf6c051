use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::hosts::Hosts;
use crate::types::Host;

/// Shared, reloadable handle to a host set.
///
/// Readers take a snapshot `Arc<Hosts>` and match against it without
/// holding the lock. Reloading builds a complete new set and swaps the
/// pointer; a published set is never modified.
#[derive(Debug, Default)]
pub struct SharedHosts {
    current: RwLock<Arc<Hosts>>,
}

impl SharedHosts {
    /// Create a handle publishing `hosts`
    pub fn new(hosts: Hosts) -> Self {
        Self {
            current: RwLock::new(Arc::new(hosts)),
        }
    }

    /// Snapshot of the current host set
    pub fn load(&self) -> Arc<Hosts> {
        self.current.read().clone()
    }

    /// Publish a new host set, returning the previous one
    pub fn store(&self, hosts: Hosts) -> Arc<Hosts> {
        let next = Arc::new(hosts);
        debug!("publishing host set with {} patterns", next.len());
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Match against the current host set
    pub fn match_host(&self, hostname: &str) -> Option<Host> {
        self.load().match_host(hostname)
    }
}

impl From<Hosts> for SharedHosts {
    fn from(hosts: Hosts) -> Self {
        Self::new(hosts)
    }
}
