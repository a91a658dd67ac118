#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use jamulus_net::{parse_server_addr, Endpoint, EndpointConfig, Outgoing};
use jamulus_proxy::{Aggregator, Scheduler};
use jamulus_protocol::{empty_record, Payload};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_INTERVAL_SECS: u64 = 300;
const POLL_CAP: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(author, version, about = "Jamulus directory aggregator")]
struct Cli {
    /// Local port number
    #[arg(long, default_value_t = jamulus_net::DEFAULT_PORT)]
    port: u16,

    /// Central directories to poll for server lists (repeatable)
    #[arg(long, required = true, num_args = 1.., value_parser = parse_server_addr)]
    centralserver: Vec<SocketAddr>,

    /// Polling interval, in seconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    interval: u64,

    /// Country IDs to keep; empty means keep everything
    #[arg(long, num_args = 0..)]
    filter: Vec<u16>,

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
            error!(%err, "failed to bind aggregator socket");
            std::process::exit(1);
        }
    };

    info!(port = cli.port, upstreams = cli.centralserver.len(), "aggregator listening");

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        if let Err(err) = ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst)) {
            warn!(%err, "failed to install signal handler");
        }
    }

    let mut aggregator = Aggregator::new();
    let mut scheduler = Scheduler::new(now_secs(), cli.interval);

    while !shutdown.load(Ordering::SeqCst) {
        if scheduler.poll(now_secs()) {
            info!("requesting server lists");
            for upstream in &cli.centralserver {
                if let Err(err) = endpoint.send(
                    *upstream,
                    Outgoing::Protocol {
                        name: "CLM_REQ_SERVER_LIST",
                        count: 0,
                        payload: &Payload::Single(empty_record()),
                    },
                ) {
                    warn!(%upstream, %err, "error requesting server list");
                }
            }
        }

        let timeout = scheduler.next_timeout(now_secs());
        if timeout <= 0 {
            continue;
        }
        let timeout = Duration::from_secs(timeout as u64).min(POLL_CAP);

        match endpoint.recv(Some(timeout)) {
            Ok((addr, message)) => {
                if let Err(err) = jamulus_proxy::handle(&endpoint, &mut aggregator, &cli.filter, addr, message) {
                    warn!(%addr, %err, "error handling message");
                }
            }
            Err(jamulus_net::EndpointError::Timeout) => continue,
            Err(err) => warn!(%err, "error receiving datagram"),
        }
    }

    info!(servers = aggregator.len(), "shutting down");
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
