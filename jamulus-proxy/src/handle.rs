//! Dispatches one decoded datagram against an [`Aggregator`], matching
//! `central_proxy.py`'s main loop.

use std::net::SocketAddr;

use jamulus_net::{Endpoint, Message, Outgoing, Result};
use jamulus_protocol::{Payload, Record};

use crate::aggregator::Aggregator;

pub fn handle(
    endpoint: &Endpoint,
    aggregator: &mut Aggregator,
    country_filter: &[u16],
    addr: SocketAddr,
    message: Message,
) -> Result<()> {
    match message {
        Message::Audio { .. } => {
            endpoint.send(
                addr,
                Outgoing::Protocol {
                    name: "CLM_DISCONNECTION",
                    count: 0,
                    payload: &Payload::Single(Record::new()),
                },
            )?;
        }
        Message::Invalid => {}
        Message::Protocol { name, payload, .. } => match name {
            "CLM_SERVER_LIST" => {
                let servers = payload.as_list()?.to_vec();
                aggregator.add_list(addr, servers);
            }
            "CLM_REQ_SERVER_LIST" => {
                aggregator.log_served(country_filter);
                let list = Payload::List(aggregator.filtered_snapshot(country_filter));
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
        },
    }
    Ok(())
}
