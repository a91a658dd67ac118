#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use jamulus_net::{parse_server_addr, silent_audio, Endpoint, EndpointConfig, Message, Outgoing};
use jamulus_protocol::{Payload, Record, Value};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_millis(500);
const TEST_VERSION: &str = "rust-test";
const TEST_OS: u8 = 2; // Linux

#[derive(Parser, Debug)]
#[command(author, version, about = "Jamulus reference server")]
struct Cli {
    /// Local port number
    #[arg(long, default_value_t = jamulus_net::DEFAULT_PORT)]
    port: u16,

    /// Number of channels advertised when registering with a central server
    #[arg(long, default_value_t = 1)]
    channels: u8,

    /// Number of placeholder clients to seed at startup
    #[arg(long, default_value_t = 0)]
    clients: u16,

    /// Central server to register on
    #[arg(long, value_parser = parse_server_addr)]
    centralserver: Option<SocketAddr>,

    /// Log protocol message payloads
    #[arg(long)]
    log_data: bool,

    /// Log audio datagrams
    #[arg(long)]
    log_audio: bool,
}

struct State {
    clients: HashMap<SocketAddr, Record>,
    pending: Vec<SocketAddr>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = EndpointConfig {
        port: Some(cli.port),
        log: true,
        log_data: cli.log_data,
        log_audio: cli.log_audio,
        ack_enabled: true,
    };

    let endpoint = match Endpoint::bind(config) {
        Ok(endpoint) => endpoint,
        Err(err) => {
            error!(%err, "failed to bind server socket");
            std::process::exit(1);
        }
    };

    if let Some(central) = cli.centralserver {
        let mut record = Record::new();
        record.insert("ip", Value::Ipv4(Ipv4Addr::UNSPECIFIED));
        record.insert("port", Value::U16(jamulus_net::DEFAULT_PORT));
        record.insert("country_id", Value::U16(0));
        record.insert("max_clients", Value::U8(cli.channels));
        record.insert("permanent", Value::U8(0));
        record.insert("name", Value::Str("Test Server".into()));
        record.insert("internal_address", Value::Str(String::new()));
        record.insert("city", Value::Str(String::new()));
        if let Err(err) = endpoint.send(
            central,
            Outgoing::Protocol {
                name: "CLM_REGISTER_SERVER",
                count: 0,
                payload: &Payload::Single(record),
            },
        ) {
            warn!(%err, "failed to register with central server");
        }
    }

    let mut state = State {
        clients: seed_clients(cli.clients),
        pending: Vec::new(),
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        if let Err(err) = ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst)) {
            warn!(%err, "failed to install signal handler");
        }
    }

    while !shutdown.load(Ordering::SeqCst) {
        let (addr, message) = match endpoint.recv(Some(POLL_INTERVAL)) {
            Ok(pair) => pair,
            Err(jamulus_net::EndpointError::Timeout) => continue,
            Err(err) => {
                warn!(%err, "error receiving datagram");
                continue;
            }
        };

        if let Err(err) = handle(&endpoint, &mut state, addr, message) {
            warn!(%addr, %err, "error handling message");
        }
    }

    info!("disconnecting clients");
    for addr in state.clients.keys() {
        if addr.ip() != Ipv4Addr::UNSPECIFIED {
            let _ = endpoint.send(
                *addr,
                Outgoing::Protocol {
                    name: "CLM_DISCONNECTION",
                    count: 0,
                    payload: &Payload::Single(Record::new()),
                },
            );
        }
    }
    if let Some(central) = cli.centralserver {
        let _ = endpoint.send(
            central,
            Outgoing::Protocol {
                name: "CLM_UNREGISTER_SERVER",
                count: 0,
                payload: &Payload::Single(Record::new()),
            },
        );
    }
}

fn seed_clients(count: u16) -> HashMap<SocketAddr, Record> {
    (0..count)
        .map(|id| {
            let addr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), id);
            let mut record = Record::new();
            record.insert("id", Value::U8(id as u8));
            record.insert("country", Value::U16(0));
            record.insert("instrument", Value::U32(0));
            record.insert("skill", Value::U8(0));
            record.insert("zero", Value::U32(0));
            record.insert("name", Value::Str(format!("Test {id}")));
            record.insert("city", Value::Str(String::new()));
            (addr, record)
        })
        .collect()
}

fn handle(endpoint: &Endpoint, state: &mut State, addr: SocketAddr, message: Message) -> jamulus_net::Result<()> {
    match message {
        Message::Invalid => Ok(()),
        Message::Audio { data } => handle_audio(endpoint, state, addr, &data),
        Message::Protocol { name, payload, .. } => handle_protocol(endpoint, state, addr, name, payload),
    }
}

fn handle_audio(endpoint: &Endpoint, state: &mut State, addr: SocketAddr, data: &[u8]) -> jamulus_net::Result<()> {
    let is_known = state.pending.contains(&addr) || state.clients.contains_key(&addr);
    if !is_known {
        state.pending.push(addr);
        let mut client_id = Record::new();
        client_id.insert("id", Value::U8(state.clients.len() as u8));
        endpoint.send(
            addr,
            Outgoing::Protocol {
                name: "CLIENT_ID",
                count: 0,
                payload: &Payload::Single(client_id),
            },
        )?;
        send_conn_clients_list(endpoint, state, addr)?;
        for name in ["REQ_SPLIT_MESS_SUPPORT", "REQ_NETW_TRANSPORT_PROPS", "REQ_JITT_BUF_SIZE", "REQ_CHANNEL_INFOS"] {
            endpoint.send(
                addr,
                Outgoing::Protocol {
                    name,
                    count: 0,
                    payload: &Payload::Single(Record::new()),
                },
            )?;
        }
        let mut chat = Record::new();
        chat.insert(
            "string",
            Value::Str("<b>Server Welcome Message:</b> This is a Test Server".into()),
        );
        endpoint.send(
            addr,
            Outgoing::Protocol {
                name: "CHAT_TEXT",
                count: 0,
                payload: &Payload::Single(chat),
            },
        )?;
    }

    let silence = silent_audio(data.len().max(3));
    endpoint.send(addr, Outgoing::Audio { data: &silence })
}

fn handle_protocol(
    endpoint: &Endpoint,
    state: &mut State,
    addr: SocketAddr,
    name: &'static str,
    payload: Payload,
) -> jamulus_net::Result<()> {
    match name {
        "CHANNEL_INFOS" => {
            let mut record = payload.as_single()?.clone();
            let id = state.clients.len() as u8;
            record.insert("id", Value::U8(id));
            record.insert("zero", Value::U32(0));
            state.clients.insert(addr, record);
            state.pending.retain(|p| p != &addr);
            send_conn_clients_list(endpoint, state, addr)
        }
        "CLM_DISCONNECTION" => {
            state.clients.remove(&addr);
            state.pending.retain(|p| p != &addr);
            Ok(())
        }
        "CLM_PING_MS" | "CLM_PING_MS_WITHNUMCLIENTS" => {
            let record = payload.as_single()?.clone();
            endpoint.send(
                addr,
                Outgoing::Protocol {
                    name,
                    count: 0,
                    payload: &Payload::Single(record),
                },
            )
        }
        "CLM_SEND_EMPTY_MESSAGE" => {
            let record = payload.as_single()?;
            let ip = record.get("ip").and_then(|v| v.as_ipv4().ok()).unwrap_or(Ipv4Addr::UNSPECIFIED);
            let port = record.get("port").and_then(|v| v.as_u16().ok()).unwrap_or(0);
            endpoint.send(
                SocketAddr::new(ip.into(), port),
                Outgoing::Protocol {
                    name: "CLM_EMPTY_MESSAGE",
                    count: 0,
                    payload: &Payload::Single(Record::new()),
                },
            )
        }
        "CLM_REQ_VERSION_AND_OS" => {
            let mut record = Record::new();
            record.insert("os", Value::U8(TEST_OS));
            record.insert("version", Value::Str(TEST_VERSION.into()));
            endpoint.send(
                addr,
                Outgoing::Protocol {
                    name: "CLM_VERSION_AND_OS",
                    count: 0,
                    payload: &Payload::Single(record),
                },
            )
        }
        "CLM_REQ_CONN_CLIENTS_LIST" => send_conn_clients_list(endpoint, state, addr),
        _ => Ok(()),
    }
}

fn send_conn_clients_list(endpoint: &Endpoint, state: &State, addr: SocketAddr) -> jamulus_net::Result<()> {
    let list = Payload::List(state.clients.values().cloned().collect());
    endpoint.send(
        addr,
        Outgoing::Protocol {
            name: "CONN_CLIENTS_LIST",
            count: 0,
            payload: &list,
        },
    )
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
