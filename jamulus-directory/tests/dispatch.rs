use std::time::Duration;

use jamulus_directory::{handle, Registry};
use jamulus_net::{Endpoint, EndpointConfig, Message};
use jamulus_protocol::empty_record;

fn ephemeral() -> Endpoint {
    Endpoint::bind(EndpointConfig {
        port: None,
        log: false,
        log_data: false,
        log_audio: false,
        ack_enabled: false,
    })
    .unwrap()
}

#[test]
fn register_then_request_list_includes_the_registered_server() {
    let directory = ephemeral();
    let client = ephemeral();
    let mut registry = Registry::new();

    let mut record = jamulus_protocol::Record::new();
    record.insert("port", jamulus_protocol::Value::U16(22124));
    record.insert("country_id", jamulus_protocol::Value::U16(82));
    record.insert("max_clients", jamulus_protocol::Value::U8(4));
    record.insert("permanent", jamulus_protocol::Value::U8(0));
    record.insert("name", jamulus_protocol::Value::Str("Room".into()));
    record.insert("internal_address", jamulus_protocol::Value::Str(String::new()));
    record.insert("city", jamulus_protocol::Value::Str(String::new()));

    client
        .send(
            directory.local_addr().unwrap(),
            jamulus_net::Outgoing::Protocol {
                name: "CLM_REGISTER_SERVER",
                count: 0,
                payload: &jamulus_protocol::Payload::Single(record),
            },
        )
        .unwrap();

    let (addr, message) = directory.recv(Some(Duration::from_secs(2))).unwrap();
    handle(&directory, &mut registry, addr, message).unwrap();
    assert_eq!(registry.len(), 1);

    let (_, resp) = client.recv(Some(Duration::from_secs(2))).unwrap();
    match resp {
        Message::Protocol { name, .. } => assert_eq!(name, "CLM_REGISTER_SERVER_RESP"),
        other => panic!("expected CLM_REGISTER_SERVER_RESP, got {other:?}"),
    }

    client
        .send(
            directory.local_addr().unwrap(),
            jamulus_net::Outgoing::Protocol {
                name: "CLM_REQ_SERVER_LIST",
                count: 0,
                payload: &jamulus_protocol::Payload::Single(empty_record()),
            },
        )
        .unwrap();
    let (addr, message) = directory.recv(Some(Duration::from_secs(2))).unwrap();
    handle(&directory, &mut registry, addr, message).unwrap();

    let (_, list_msg) = client.recv(Some(Duration::from_secs(2))).unwrap();
    match list_msg {
        Message::Protocol { name, payload, .. } => {
            assert_eq!(name, "CLM_SERVER_LIST");
            let entries = payload.as_list().unwrap();
            assert_eq!(entries.len(), 2); // self-entry + registered server
        }
        other => panic!("expected CLM_SERVER_LIST, got {other:?}"),
    }
}

#[test]
fn audio_from_an_unregistered_peer_is_rejected_with_disconnection() {
    let directory = ephemeral();
    let client = ephemeral();
    let mut registry = Registry::new();

    let silence = jamulus_net::silent_audio(22);
    client
        .send(
            directory.local_addr().unwrap(),
            jamulus_net::Outgoing::Audio { data: &silence },
        )
        .unwrap();

    let (addr, message) = directory.recv(Some(Duration::from_secs(2))).unwrap();
    handle(&directory, &mut registry, addr, message).unwrap();

    let (_, reply) = client.recv(Some(Duration::from_secs(2))).unwrap();
    match reply {
        Message::Protocol { name, .. } => assert_eq!(name, "CLM_DISCONNECTION"),
        other => panic!("expected CLM_DISCONNECTION, got {other:?}"),
    }
}
