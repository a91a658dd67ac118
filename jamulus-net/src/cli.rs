//! The `HOST[:PORT]` address syntax shared by every binary's remote-peer
//! CLI arguments, resolving `HOST` synchronously the way `server_argument`
//! does.

use std::net::{SocketAddr, ToSocketAddrs};

use crate::DEFAULT_PORT;

/// Parses `HOST` or `HOST:PORT`, resolving `HOST` via the system resolver
/// and defaulting to [`DEFAULT_PORT`] when no port is given.
pub fn parse_server_addr(s: &str) -> std::result::Result<SocketAddr, String> {
    let (host, port) = match s.rsplit_once(':') {
        Some((host, port_str)) => {
            let port: u16 = port_str
                .parse()
                .map_err(|_| format!("invalid port in '{s}'"))?;
            (host, port)
        }
        None => (s, DEFAULT_PORT),
    };

    format!("{host}:{port}")
        .to_socket_addrs()
        .map_err(|err| format!("could not resolve '{host}': {err}"))?
        .next()
        .ok_or_else(|| format!("no address found for '{host}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_standard_port() {
        let addr = parse_server_addr("127.0.0.1").unwrap();
        assert_eq!(addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn accepts_explicit_port() {
        let addr = parse_server_addr("127.0.0.1:9000").unwrap();
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn rejects_garbage_port() {
        assert!(parse_server_addr("127.0.0.1:not-a-port").is_err());
    }
}
