#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use jamulus_directory::Registry;
use jamulus_net::{Endpoint, EndpointConfig};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How often the receive loop checks for a requested shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Parser, Debug)]
#[command(author, version, about = "Jamulus central directory server")]
struct Cli {
    /// Local port number
    #[arg(long, default_value_t = jamulus_net::DEFAULT_PORT)]
    port: u16,

    /// Log decoded message payloads
    #[arg(long)]
    log_data: bool,

    /// Log audio datagrams (suppressed by default, like the reference connector)
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
            error!(%err, "failed to bind directory socket");
            std::process::exit(1);
        }
    };

    info!(port = cli.port, "directory server listening");

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        if let Err(err) = ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst)) {
            warn!(%err, "failed to install signal handler");
        }
    }

    let mut registry = Registry::new();

    while !shutdown.load(Ordering::SeqCst) {
        match endpoint.recv(Some(POLL_INTERVAL)) {
            Ok((addr, message)) => {
                if let Err(err) = jamulus_directory::handle(&endpoint, &mut registry, addr, message) {
                    warn!(%addr, %err, "error handling message");
                }
            }
            Err(jamulus_net::EndpointError::Timeout) => continue,
            Err(err) => {
                warn!(%err, "error receiving datagram");
            }
        }
    }

    info!(registered = registry.len(), "shutting down");
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
