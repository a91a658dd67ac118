//! End-to-end frame vectors exercising the full encode/decode path rather
//! than individual layers.

use jamulus_protocol::{
    decode_main_frame, empty_record, encode_main_frame, CodecError, Payload, Record, Value,
};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn unhex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

#[test]
fn clm_req_server_list_round_trips_the_reference_vector() {
    let wire = unhex("0000ef0300000018cb");
    let decoded = decode_main_frame(&wire).unwrap();
    assert_eq!(decoded.name, "CLM_REQ_SERVER_LIST");
    assert_eq!(decoded.count, 0);
    assert_eq!(decoded.payload, Payload::Single(empty_record()));

    let encoded = encode_main_frame("CLM_REQ_SERVER_LIST", 0, &Payload::Single(empty_record())).unwrap();
    assert_eq!(hex(&encoded), "0000ef0300000018cb");
}

#[test]
fn clm_ping_ms_round_trips_the_reference_vector() {
    let wire = unhex("0000e903000400000000006f60");
    let decoded = decode_main_frame(&wire).unwrap();
    assert_eq!(decoded.name, "CLM_PING_MS");
    assert_eq!(decoded.payload.as_single().unwrap()["time"], Value::U32(0));

    let mut record = Record::new();
    record.insert("time", Value::U32(0));
    let encoded = encode_main_frame("CLM_PING_MS", 0, &Payload::Single(record)).unwrap();
    assert_eq!(hex(&encoded), hex(&wire));
}

#[test]
fn register_server_ex_carries_os_and_version_that_server_list_drops() {
    let mut record = Record::new();
    record.insert("port", Value::U16(22_124));
    record.insert("country_id", Value::U16(82));
    record.insert("max_clients", Value::U8(10));
    record.insert("permanent", Value::U8(1));
    record.insert("name", Value::Str("Rehearsal Room".into()));
    record.insert("internal_address", Value::Str(String::new()));
    record.insert("city", Value::Str("Berlin".into()));
    record.insert("os", Value::U8(2));
    record.insert("version", Value::Str("3.10.0".into()));

    let encoded = encode_main_frame("CLM_REGISTER_SERVER_EX", 0, &Payload::Single(record)).unwrap();
    let decoded = decode_main_frame(&encoded).unwrap();
    let fields = decoded.payload.as_single().unwrap();
    assert_eq!(fields["os"], Value::U8(2));
    assert_eq!(fields["version"], Value::Str("3.10.0".into()));

    // The same key/value map, minus os/version, encodes fine against the
    // non-extended CLM_SERVER_LIST entry schema plus an ip field: encode_record
    // only reads fields it knows about, so extra keys are silently ignored.
    let mut entry = fields.clone();
    entry.insert("ip", Value::Ipv4("203.0.113.9".parse().unwrap()));
    let list_encoded =
        encode_main_frame("CLM_SERVER_LIST", 0, &Payload::List(vec![entry])).unwrap();
    let list_decoded = decode_main_frame(&list_encoded).unwrap();
    let entries = list_decoded.payload.as_list().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].contains_key("os"));
    assert!(!entries[0].contains_key("version"));
}

#[test]
fn any_single_bit_flip_is_detected() {
    let wire = unhex("0000ef0300000018cb");
    for byte_idx in 0..wire.len() {
        for bit in 0..8u8 {
            let mut corrupted = wire.clone();
            corrupted[byte_idx] ^= 1 << bit;
            assert!(decode_main_frame(&corrupted).is_err());
        }
    }
}

#[test]
fn unknown_message_id_is_rejected() {
    // tag=0 id=9999 count=0 len=0, with a correct CRC trailer.
    let mut framed = vec![0u8, 0];
    framed.extend_from_slice(&9999u16.to_le_bytes());
    framed.push(0);
    framed.extend_from_slice(&0u16.to_le_bytes());
    let crc = jamulus_protocol::calc_crc(&framed);
    framed.extend_from_slice(&crc.to_le_bytes());

    assert_eq!(decode_main_frame(&framed), Err(CodecError::InvalidId(9999)));
}

#[test]
fn audio_datagrams_pass_through_untouched() {
    let payload = vec![0xAAu8; 160];
    let encoded = jamulus_protocol::encode_audio(&payload);
    assert_eq!(encoded, payload);
    assert_eq!(jamulus_protocol::decode_audio(&encoded), payload);
}
