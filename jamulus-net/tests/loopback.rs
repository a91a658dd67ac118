use std::time::Duration;

use jamulus_net::{Endpoint, EndpointConfig, Message, Outgoing};
use jamulus_protocol::{empty_record, Payload};

fn ephemeral_config() -> EndpointConfig {
    EndpointConfig {
        port: None,
        log: false,
        log_data: false,
        log_audio: false,
        ack_enabled: true,
    }
}

#[test]
fn protocol_message_round_trips_and_is_acknowledged() {
    let server = Endpoint::bind(ephemeral_config()).unwrap();
    let client = Endpoint::bind(ephemeral_config()).unwrap();

    client
        .send(
            server.local_addr().unwrap(),
            Outgoing::Protocol {
                name: "REQ_JITT_BUF_SIZE",
                count: 0,
                payload: &Payload::Single(empty_record()),
            },
        )
        .unwrap();

    let (from, message) = server.recv(Some(Duration::from_secs(2))).unwrap();
    assert_eq!(from, client.local_addr().unwrap());
    match message {
        Message::Protocol { name, .. } => assert_eq!(name, "REQ_JITT_BUF_SIZE"),
        other => panic!("expected a protocol message, got {other:?}"),
    }

    let (_, ack) = client.recv(Some(Duration::from_secs(2))).unwrap();
    match ack {
        Message::Protocol { name, .. } => assert_eq!(name, "ACKN"),
        other => panic!("expected an ACKN reply, got {other:?}"),
    }
}

#[test]
fn audio_datagram_round_trips_without_acknowledgement() {
    let server = Endpoint::bind(ephemeral_config()).unwrap();
    let client = Endpoint::bind(ephemeral_config()).unwrap();

    let payload = jamulus_net::silent_audio(22);
    client
        .send(
            server.local_addr().unwrap(),
            Outgoing::Audio { data: &payload },
        )
        .unwrap();

    let (_, message) = server.recv(Some(Duration::from_secs(2))).unwrap();
    match message {
        Message::Audio { data } => assert_eq!(data, payload),
        other => panic!("expected an audio message, got {other:?}"),
    }

    // no ACKN should follow for audio
    let result = client.recv(Some(Duration::from_millis(200)));
    assert!(result.is_err());
}

#[test]
fn recv_times_out_when_nothing_arrives() {
    let endpoint = Endpoint::bind(ephemeral_config()).unwrap();
    let result = endpoint.recv(Some(Duration::from_millis(100)));
    assert!(matches!(result, Err(jamulus_net::EndpointError::Timeout)));
}
