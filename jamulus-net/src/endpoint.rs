//! Blocking UDP endpoint: binds a socket, encodes/decodes datagrams through
//! `jamulus_protocol`, and handles the automatic `ACKN` reply.

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use jamulus_protocol::{
    by_name, decode_audio, decode_main_frame, encode_audio, encode_main_frame, requires_ack,
    Payload, Record, MAX_DATAGRAM_BYTES,
};
use tracing::{debug, warn};

use crate::error::{EndpointError, Result};

/// The three logging toggles from the original connector, plus whether the
/// endpoint should send `ACKN` automatically on receipt of a message that
/// requires one.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub port: Option<u16>,
    pub log: bool,
    pub log_data: bool,
    pub log_audio: bool,
    pub ack_enabled: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        EndpointConfig {
            port: Some(crate::DEFAULT_PORT),
            log: true,
            log_data: false,
            log_audio: true,
            ack_enabled: true,
        }
    }
}

/// A decoded incoming datagram, together with its sender.
#[derive(Debug, Clone)]
pub enum Message {
    Protocol {
        name: &'static str,
        count: u8,
        payload: Payload,
    },
    Audio {
        data: Vec<u8>,
    },
    /// A datagram too short to be either a main frame or audio (fewer than
    /// one byte), or a main frame that failed to decode.
    Invalid,
}

/// An outgoing datagram to encode and send.
pub enum Outgoing<'a> {
    Protocol {
        name: &'static str,
        count: u8,
        payload: &'a Payload,
    },
    Audio {
        data: &'a [u8],
    },
}

/// A bound UDP socket speaking the Jamulus wire protocol.
pub struct Endpoint {
    socket: UdpSocket,
    config: EndpointConfig,
}

impl Endpoint {
    /// Binds a socket on `config.port` (or an ephemeral port if `None`).
    pub fn bind(config: EndpointConfig) -> Result<Self> {
        let port = config.port.unwrap_or(0);
        let socket = UdpSocket::bind(("0.0.0.0", port))?;
        debug!(port = socket.local_addr()?.port(), "listening");
        Ok(Endpoint { socket, config })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Encodes `message` and sends it to `addr`.
    pub fn send(&self, addr: SocketAddr, message: Outgoing<'_>) -> Result<()> {
        let (name, data) = match message {
            Outgoing::Audio { data } => ("AUDIO", encode_audio(data)),
            Outgoing::Protocol {
                name,
                count,
                payload,
            } => (name, encode_main_frame(name, count, payload)?),
        };

        if data.len() > MAX_DATAGRAM_BYTES {
            return Err(EndpointError::Oversize {
                actual: data.len(),
                limit: MAX_DATAGRAM_BYTES,
            });
        }

        self.log_message(addr, name, None, data.len(), false);
        self.socket.send_to(&data, addr)?;
        Ok(())
    }

    /// Receives and decodes one datagram, automatically replying with
    /// `ACKN` when the decoded message requires it. Blocks (up to
    /// `timeout`, if set) until a datagram arrives.
    pub fn recv(&self, timeout: Option<Duration>) -> Result<(SocketAddr, Message)> {
        self.socket.set_read_timeout(timeout)?;

        let mut buf = vec![0u8; MAX_DATAGRAM_BYTES];
        let (len, addr) = match self.socket.recv_from(&mut buf) {
            Ok(pair) => pair,
            Err(err)
                if err.kind() == std::io::ErrorKind::WouldBlock
                    || err.kind() == std::io::ErrorKind::TimedOut =>
            {
                return Err(EndpointError::Timeout)
            }
            Err(err) => return Err(err.into()),
        };
        let data = &buf[..len];

        if len >= 9 && data[0] == 0 && data[1] == 0 {
            match decode_main_frame(data) {
                Ok(frame) => {
                    self.log_message(addr, frame.name, Some(&frame.payload), len, true);
                    if self.config.ack_enabled {
                        self.send_ack(addr, frame.name, frame.count)?;
                    }
                    return Ok((
                        addr,
                        Message::Protocol {
                            name: frame.name,
                            count: frame.count,
                            payload: frame.payload,
                        },
                    ));
                }
                Err(err) => {
                    warn!(%addr, %err, "error decoding message");
                    return Ok((addr, Message::Invalid));
                }
            }
        } else if len >= 1 {
            let data = decode_audio(data);
            self.log_message(addr, "AUDIO", None, len, true);
            return Ok((addr, Message::Audio { data }));
        }

        warn!(%addr, len, "received undecodable datagram");
        Ok((addr, Message::Invalid))
    }

    fn send_ack(&self, addr: SocketAddr, name: &'static str, count: u8) -> Result<()> {
        let Some(def) = by_name(name) else {
            return Ok(());
        };
        if !requires_ack(def.id) {
            return Ok(());
        }
        let mut record = Record::new();
        record.insert("id", jamulus_protocol::Value::U16(def.id));
        self.send(
            addr,
            Outgoing::Protocol {
                name: "ACKN",
                count,
                payload: &Payload::Single(record),
            },
        )
    }

    fn log_message(
        &self,
        addr: SocketAddr,
        name: &str,
        payload: Option<&Payload>,
        len: usize,
        recv: bool,
    ) {
        if !self.config.log || (name == "AUDIO" && !self.config.log_audio) {
            return;
        }
        let direction = if recv { ">" } else { "<" };
        if self.config.log_data && name != "ACKN" {
            debug!(%addr, direction, name, len, ?payload, "datagram");
        } else {
            debug!(%addr, direction, name, len, "datagram");
        }
    }
}
