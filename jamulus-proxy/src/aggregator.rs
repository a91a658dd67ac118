//! The aggregator's merged server list: entries reported by one or more
//! upstream directories, keyed by the server's own `(ip, port)`.

use std::collections::HashMap;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::{SystemTime, UNIX_EPOCH};

use jamulus_protocol::tables::{country_name, os_name};
use jamulus_protocol::{Record, Value};
use tracing::info;

type Key = (Ipv4Addr, u16);

/// One merged entry: the last record received for this server, plus the
/// bookkeeping `central_proxy.py`'s `ServerList` keeps alongside it.
#[derive(Debug, Clone)]
pub struct AggregatorEntry {
    pub record: Record,
    pub time_created: u64,
    pub time_updated: u64,
    pub source_host: SocketAddr,
}

impl fmt::Display for AggregatorEntry {
    /// Mirrors `ServerList.format_server`'s one-line summary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.record;
        let ip = r.get("ip").and_then(|v| v.as_ipv4().ok()).unwrap_or(Ipv4Addr::UNSPECIFIED);
        let port = field_u16(r, "port");
        let permanent = field_u8(r, "permanent") == 1;
        let name = field_str(r, "name");
        let city = field_str(r, "city");
        let country = country_name(field_u16(r, "country_id"));
        let os = r.get("os").map(|v| os_name(v.as_u8().unwrap_or(u8::MAX))).unwrap_or("?");
        let version = field_str_or(r, "version", "?");
        let internal_address = field_str(r, "internal_address");
        let age = now_secs().saturating_sub(self.time_updated);

        write!(
            f,
            "{:>15}:{:<5} {} {:<20} {}/{} ({}/{}) {}s {}",
            ip,
            port,
            if permanent { "*" } else { " " },
            name,
            city,
            country,
            os,
            version,
            age,
            internal_address,
        )
    }
}

fn field_u16(record: &Record, key: &str) -> u16 {
    record.get(key).and_then(|v| v.as_u16().ok()).unwrap_or(0)
}

fn field_u8(record: &Record, key: &str) -> u8 {
    record.get(key).and_then(|v| v.as_u8().ok()).unwrap_or(0)
}

fn field_str<'a>(record: &'a Record, key: &str) -> &'a str {
    record.get(key).and_then(|v| v.as_str().ok()).unwrap_or("")
}

fn field_str_or<'a>(record: &'a Record, key: &str, default: &'a str) -> &'a str {
    record.get(key).and_then(|v| v.as_str().ok()).unwrap_or(default)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Merges `CLM_SERVER_LIST` reports from one or more upstream directories
/// into a single map. There is no eviction or TTL: a long-running
/// aggregator grows unboundedly, matching the reference implementation.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: HashMap<Key, AggregatorEntry>,
}

impl Aggregator {
    pub fn new() -> Self {
        Aggregator::default()
    }

    /// Adds or updates a whole `CLM_SERVER_LIST` payload received from
    /// `source_host`. A server reporting itself as `0.0.0.0` (the
    /// directory's own dummy self-entry) is rewritten to the directory's
    /// own address, since that is the only address the aggregator can
    /// actually reach it at.
    pub fn add_list(&mut self, source_host: SocketAddr, servers: Vec<Record>) {
        for mut record in servers {
            let reported_ip = record.get("ip").and_then(|v| v.as_ipv4().ok()).unwrap_or(Ipv4Addr::UNSPECIFIED);
            let (ip, port) = if reported_ip.is_unspecified() {
                let port = source_port(source_host);
                (source_ip(source_host), port)
            } else {
                (reported_ip, field_u16(&record, "port"))
            };
            record.insert("ip", Value::Ipv4(ip));
            self.create_or_update((ip, port), record, source_host);
        }
    }

    fn create_or_update(&mut self, key: Key, record: Record, source_host: SocketAddr) {
        let now = now_secs();
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.record = record;
                entry.time_updated = now;
                info!("updating server\n{entry}");
            }
            None => {
                let entry = AggregatorEntry {
                    record,
                    time_created: now,
                    time_updated: now,
                    source_host,
                };
                info!("adding server\n{entry}");
                self.entries.insert(key, entry);
            }
        }
    }

    /// Keeps only entries whose `country_id` is in `country_ids`. An empty
    /// filter list keeps everything, matching `ServerList.filter`'s
    /// `len(country_ids) > 0` guard.
    pub fn filtered_snapshot(&self, country_ids: &[u16]) -> Vec<Record> {
        let mut entries: Vec<Record> = self
            .entries
            .values()
            .filter(|entry| {
                country_ids.is_empty() || country_ids.contains(&field_u16(&entry.record, "country_id"))
            })
            .map(|entry| entry.record.clone())
            .collect();

        let mut out = Vec::with_capacity(entries.len() + 1);
        out.push(self_entry());
        out.append(&mut entries);
        out
    }

    pub fn entries(&self) -> impl Iterator<Item = &AggregatorEntry> {
        self.entries.values()
    }

    /// Logs the list about to be served, one line per entry, matching
    /// `central_proxy.py`'s `print("sending {} servers\n{}"...)`.
    pub fn log_served(&self, country_ids: &[u16]) {
        let matching: Vec<&AggregatorEntry> = self
            .entries()
            .filter(|entry| {
                country_ids.is_empty() || country_ids.contains(&field_u16(&entry.record, "country_id"))
            })
            .collect();
        let mut summary = String::new();
        for entry in &matching {
            summary.push('\n');
            summary.push_str(&entry.to_string());
        }
        info!("sending {} servers{summary}", matching.len() + 1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn self_entry() -> Record {
    let mut record = Record::new();
    record.insert("ip", Value::Ipv4(Ipv4Addr::UNSPECIFIED));
    record.insert("port", Value::U16(0));
    record.insert("country_id", Value::U16(0));
    record.insert("max_clients", Value::U8(0));
    record.insert("permanent", Value::U8(1));
    record.insert("name", Value::Str("Jamulus Proxy".into()));
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

fn source_port(addr: SocketAddr) -> u16 {
    addr.port()
}
