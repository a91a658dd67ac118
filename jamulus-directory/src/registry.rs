//! The central directory's server list: a map from the registering peer's
//! address to its most recently registered record.

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};

use jamulus_protocol::{Record, Value};
use tracing::info;

/// Servers currently registered with the directory, keyed by the address
/// they registered from.
#[derive(Debug, Default)]
pub struct Registry {
    servers: HashMap<SocketAddr, Record>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registers (or re-registers) `addr` with `record`, overwriting its
    /// `ip` field with the address the registration actually arrived from
    /// — clients cannot spoof another host's listing.
    pub fn register(&mut self, addr: SocketAddr, mut record: Record) {
        record.insert("ip", Value::Ipv4(source_ip(addr)));
        info!(%addr, "registering server");
        self.servers.insert(addr, record);
    }

    pub fn unregister(&mut self, addr: SocketAddr) {
        if self.servers.remove(&addr).is_some() {
            info!(%addr, "unregistering server");
        }
    }

    /// Returns the full list to publish via `CLM_SERVER_LIST`: a
    /// zero-valued self-entry first, followed by every registered server
    /// in insertion-independent (map) order.
    pub fn snapshot(&self) -> Vec<Record> {
        let mut entries = Vec::with_capacity(self.servers.len() + 1);
        entries.push(self_entry());
        entries.extend(self.servers.values().cloned());
        entries
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

fn self_entry() -> Record {
    let mut record = Record::new();
    record.insert("ip", Value::Ipv4(Ipv4Addr::UNSPECIFIED));
    record.insert("port", Value::U16(0));
    record.insert("country_id", Value::U16(0));
    record.insert("max_clients", Value::U8(0));
    record.insert("permanent", Value::U8(0));
    record.insert("name", Value::Str(String::new()));
    record.insert("internal_address", Value::Str(String::new()));
    record.insert("city", Value::Str(String::new()));
    record
}

fn source_ip(addr: SocketAddr) -> Ipv4Addr {
    match addr.ip() {
        std::net::IpAddr::V4(ip) => ip,
        std::net::IpAddr::V6(_) => Ipv4Addr::UNSPECIFIED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(port: u16) -> SocketAddr {
        format!("203.0.113.5:{port}").parse().unwrap()
    }

    fn server_record() -> Record {
        let mut record = Record::new();
        record.insert("port", Value::U16(22124));
        record.insert("country_id", Value::U16(82));
        record.insert("max_clients", Value::U8(10));
        record.insert("permanent", Value::U8(0));
        record.insert("name", Value::Str("Test Server".into()));
        record.insert("internal_address", Value::Str(String::new()));
        record.insert("city", Value::Str(String::new()));
        record
    }

    #[test]
    fn snapshot_always_leads_with_the_self_entry() {
        let registry = Registry::new();
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0]["permanent"], Value::U8(0));
    }

    #[test]
    fn register_overwrites_the_declared_ip_with_the_real_source() {
        let mut registry = Registry::new();
        registry.register(addr(9000), server_record());
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot[1]["ip"],
            Value::Ipv4("203.0.113.5".parse().unwrap())
        );
    }

    #[test]
    fn unregister_removes_the_entry() {
        let mut registry = Registry::new();
        registry.register(addr(9000), server_record());
        registry.unregister(addr(9000));
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn re_registering_the_same_peer_replaces_its_entry() {
        let mut registry = Registry::new();
        registry.register(addr(9000), server_record());
        let mut updated = server_record();
        updated.insert("name", Value::Str("Renamed".into()));
        registry.register(addr(9000), updated);
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1]["name"], Value::Str("Renamed".into()));
    }
}
