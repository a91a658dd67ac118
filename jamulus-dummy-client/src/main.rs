#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use jamulus_net::{parse_server_addr, silent_audio, Endpoint, EndpointConfig, Message, Outgoing};
use jamulus_protocol::{Payload, Record, Value};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const BASE_NETW_SIZE: usize = 22;
const JITT_BUF_SIZE: u16 = 5;
const POLL_INTERVAL: Duration = Duration::from_millis(500);
const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(author, version, about = "Jamulus reference client")]
struct Cli {
    /// Local port number
    #[arg(long, default_value_t = jamulus_net::DEFAULT_PORT)]
    port: u16,

    /// Central server to register on
    #[arg(long, required = true, value_parser = parse_server_addr)]
    server: SocketAddr,

    /// Log protocol message payloads
    #[arg(long)]
    log_data: bool,

    /// Log audio datagrams
    #[arg(long)]
    log_audio: bool,
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
            error!(%err, "failed to bind client socket");
            std::process::exit(1);
        }
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        if let Err(err) = ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst)) {
            warn!(%err, "failed to install signal handler");
        }
    }

    let silence = silent_audio(BASE_NETW_SIZE);
    if let Err(err) = endpoint.send(cli.server, Outgoing::Audio { data: &silence }) {
        warn!(%err, "failed to send initial audio frame");
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

        if addr != cli.server {
            continue;
        }

        if let Err(err) = handle(&endpoint, cli.server, &silence, message) {
            warn!(%err, "error handling message");
        }
    }

    info!("disconnecting");
    let _ = endpoint.send(
        cli.server,
        Outgoing::Protocol {
            name: "CLM_DISCONNECTION",
            count: 0,
            payload: &Payload::Single(Record::new()),
        },
    );
    let deadline = std::time::Instant::now() + DRAIN_TIMEOUT;
    while std::time::Instant::now() < deadline {
        if endpoint.recv(Some(Duration::from_millis(100))).is_err() {
            break;
        }
    }
}

fn handle(
    endpoint: &Endpoint,
    server: SocketAddr,
    silence: &[u8],
    message: Message,
) -> jamulus_net::Result<()> {
    let (name, _payload) = match message {
        Message::Audio { .. } => {
            return endpoint.send(server, Outgoing::Audio { data: silence });
        }
        Message::Invalid => return Ok(()),
        Message::Protocol { name, payload, .. } => (name, payload),
    };

    match name {
        "REQ_SPLIT_MESS_SUPPORT" => endpoint.send(
            server,
            Outgoing::Protocol {
                name: "SPLIT_MESS_SUPPORTED",
                count: 0,
                payload: &Payload::Single(Record::new()),
            },
        ),
        "REQ_NETW_TRANSPORT_PROPS" => {
            let mut record = Record::new();
            record.insert("base_netw_size", Value::U32(BASE_NETW_SIZE as u32));
            record.insert("block_size_fact", Value::U16(1));
            record.insert("num_chan", Value::U8(1));
            record.insert("sam_rate", Value::U32(48_000));
            record.insert("audiocod_type", Value::U16(3));
            record.insert("flags", Value::U16(0));
            record.insert("audiocod_arg", Value::U32(0));
            endpoint.send(
                server,
                Outgoing::Protocol {
                    name: "NETW_TRANSPORT_PROPS",
                    count: 0,
                    payload: &Payload::Single(record),
                },
            )
        }
        "REQ_JITT_BUF_SIZE" => {
            let mut record = Record::new();
            record.insert("blocks", Value::U16(JITT_BUF_SIZE));
            endpoint.send(
                server,
                Outgoing::Protocol {
                    name: "JITT_BUF_SIZE",
                    count: 0,
                    payload: &Payload::Single(record),
                },
            )
        }
        "REQ_CHANNEL_INFOS" => {
            let mut record = Record::new();
            record.insert("country", Value::U16(0));
            record.insert("instrument", Value::U32(0));
            record.insert("skill", Value::U8(0));
            record.insert("name", Value::Str("Test Client".into()));
            record.insert("city", Value::Str(String::new()));
            endpoint.send(
                server,
                Outgoing::Protocol {
                    name: "CHANNEL_INFOS",
                    count: 0,
                    payload: &Payload::Single(record),
                },
            )
        }
        _ => Ok(()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
