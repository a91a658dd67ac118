//! Dispatches one decoded datagram against a [`Registry`], issuing the
//! replies `central_server.py` sends for each message kind.

use std::net::SocketAddr;

use jamulus_net::{Endpoint, Message, Outgoing, Result};
use jamulus_protocol::{Payload, Record, Value};

use crate::registry::Registry;

/// Handles one received message, mutating `registry` and replying through
/// `endpoint` as needed. Unrecognized message kinds are ignored, matching
/// the original's unconditional `if/elif` chain falling through silently.
pub fn handle(
    endpoint: &Endpoint,
    registry: &mut Registry,
    addr: SocketAddr,
    message: Message,
) -> Result<()> {
    let (name, payload) = match message {
        Message::Audio { .. } => {
            return endpoint.send(
                addr,
                Outgoing::Protocol {
                    name: "CLM_DISCONNECTION",
                    count: 0,
                    payload: &Payload::Single(Record::new()),
                },
            );
        }
        Message::Invalid => return Ok(()),
        Message::Protocol { name, payload, .. } => (name, payload),
    };

    match name {
        "CLM_REGISTER_SERVER" | "CLM_REGISTER_SERVER_EX" => {
            let record = payload.as_single()?.clone();
            registry.register(addr, record);
            let mut status = Record::new();
            status.insert("status", Value::U8(0));
            endpoint.send(
                addr,
                Outgoing::Protocol {
                    name: "CLM_REGISTER_SERVER_RESP",
                    count: 0,
                    payload: &Payload::Single(status),
                },
            )?;
        }
        "CLM_UNREGISTER_SERVER" => {
            registry.unregister(addr);
        }
        "CLM_REQ_SERVER_LIST" => {
            let list = Payload::List(registry.snapshot());
            endpoint.send(
                addr,
                Outgoing::Protocol {
                    name: "CLM_SERVER_LIST",
                    count: 0,
                    payload: &list,
                },
            )?;
        }
        _ => {}
    }

    Ok(())
}
