//! The main-frame wrapper: tag, id, count, length-prefixed payload, CRC.

use crate::catalog::{self, MessageDef};
use crate::crc::calc_crc;
use crate::error::{CodecError, Result};
use crate::schema::{self, Payload};

/// Datagrams larger than this are refused by the sender.
pub const MAX_DATAGRAM_BYTES: usize = 20_000;

const HEADER_LEN: usize = 7; // tag(2) + id(2) + count(1) + payload_len(2)
const CRC_LEN: usize = 2;
const MIN_FRAME_LEN: usize = HEADER_LEN + CRC_LEN;

/// Encodes a complete main-frame datagram for the named message kind.
pub fn encode_main_frame(name: &str, count: u8, payload: &Payload) -> Result<Vec<u8>> {
    let def = catalog::by_name(name).ok_or(CodecError::InvalidId(0))?;
    let body = encode_body(def, payload)?;

    if HEADER_LEN + body.len() + CRC_LEN > MAX_DATAGRAM_BYTES {
        return Err(CodecError::Oversize {
            actual: HEADER_LEN + body.len() + CRC_LEN,
            limit: MAX_DATAGRAM_BYTES,
        });
    }
    if body.len() > u16::MAX as usize {
        return Err(CodecError::Oversize {
            actual: body.len(),
            limit: u16::MAX as usize,
        });
    }

    let mut frame = Vec::with_capacity(HEADER_LEN + body.len() + CRC_LEN);
    frame.extend_from_slice(&0u16.to_le_bytes()); // tag
    frame.extend_from_slice(&def.id.to_le_bytes());
    frame.push(count);
    frame.extend_from_slice(&(body.len() as u16).to_le_bytes());
    frame.extend_from_slice(&body);

    let crc = calc_crc(&frame);
    frame.extend_from_slice(&crc.to_le_bytes());
    Ok(frame)
}

fn encode_body(def: &MessageDef, payload: &Payload) -> Result<Vec<u8>> {
    match (def.repeatable, payload) {
        (false, Payload::Single(record)) => schema::encode_record(def.schema, record),
        (true, Payload::List(records)) => schema::encode_repeated(def.schema, records),
        (false, Payload::List(_)) => Err(CodecError::KindMismatch {
            field: "payload",
            expected: "single record",
        }),
        (true, Payload::Single(_)) => Err(CodecError::KindMismatch {
            field: "payload",
            expected: "record list",
        }),
    }
}

/// The decoded form of a main frame: the message's symbolic name, its
/// sender-assigned count, and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    pub name: &'static str,
    pub count: u8,
    pub payload: Payload,
}

/// Decodes a complete main-frame datagram, verifying its CRC, tag, declared
/// length, and message id before parsing the payload.
pub fn decode_main_frame(data: &[u8]) -> Result<DecodedFrame> {
    if data.len() < MIN_FRAME_LEN {
        return Err(CodecError::InvalidLength(format!(
            "frame too short: {} bytes, need at least {MIN_FRAME_LEN}",
            data.len()
        )));
    }

    let (framed, crc_bytes) = data.split_at(data.len() - CRC_LEN);
    let actual_crc = u16::from_le_bytes([crc_bytes[0], crc_bytes[1]]);
    let expected_crc = calc_crc(framed);
    if expected_crc != actual_crc {
        return Err(CodecError::InvalidCrc {
            expected: expected_crc,
            actual: actual_crc,
        });
    }

    let tag = u16::from_le_bytes([framed[0], framed[1]]);
    if tag != 0 {
        return Err(CodecError::InvalidLength("non-zero main-frame tag".into()));
    }
    let id = u16::from_le_bytes([framed[2], framed[3]]);
    let count = framed[4];
    let payload_len = u16::from_le_bytes([framed[5], framed[6]]) as usize;
    let body = &framed[HEADER_LEN..];
    if payload_len != body.len() {
        return Err(CodecError::InvalidLength(format!(
            "declared payload length {payload_len} does not match {} remaining bytes",
            body.len()
        )));
    }

    if id == 0 {
        return Err(CodecError::InvalidId(0));
    }
    let def = catalog::by_id(id).ok_or(CodecError::InvalidId(id))?;

    let payload = if def.repeatable {
        Payload::List(schema::decode_repeated(def.schema, body)?)
    } else {
        Payload::Single(schema::decode_record(def.schema, body)?)
    };

    Ok(DecodedFrame {
        name: def.name,
        count,
        payload,
    })
}

/// `AUDIO` carries no main frame and no CRC: the datagram bytes are the
/// payload, verbatim.
pub fn encode_audio(data: &[u8]) -> Vec<u8> {
    data.to_vec()
}

pub fn decode_audio(data: &[u8]) -> Vec<u8> {
    data.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{empty_record, Record};
    use crate::field::Value;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn encode_req_server_list_matches_reference_vector() {
        let frame = encode_main_frame("CLM_REQ_SERVER_LIST", 0, &Payload::Single(empty_record())).unwrap();
        assert_eq!(hex(&frame), "0000ef0300000018cb");
    }

    #[test]
    fn encode_ping_matches_reference_vector() {
        let mut record = Record::new();
        record.insert("time", Value::U32(0));
        let frame = encode_main_frame("CLM_PING_MS", 0, &Payload::Single(record)).unwrap();
        assert_eq!(hex(&frame), "0000e903000400000000006f60");
    }

    #[test]
    fn decode_ping_matches_reference_vector() {
        let data = decode_hex("0000e903000400000000006f60");
        let decoded = decode_main_frame(&data).unwrap();
        assert_eq!(decoded.name, "CLM_PING_MS");
        assert_eq!(decoded.count, 0);
        let record = decoded.payload.as_single().unwrap();
        assert_eq!(record["time"], Value::U32(0));
    }

    #[test]
    fn frame_round_trip_is_identity() {
        let mut record = Record::new();
        record.insert("time", Value::U32(424242));
        record.insert("clients", Value::U8(3));
        let encoded =
            encode_main_frame("CLM_PING_MS_WITHNUMCLIENTS", 7, &Payload::Single(record.clone())).unwrap();
        let decoded = decode_main_frame(&encoded).unwrap();
        assert_eq!(decoded.name, "CLM_PING_MS_WITHNUMCLIENTS");
        assert_eq!(decoded.count, 7);
        assert_eq!(decoded.payload, Payload::Single(record));
    }

    #[test]
    fn bit_flip_breaks_crc() {
        let data = decode_hex("0000ef0300000018cb");
        for byte_idx in 0..data.len() - 2 {
            for bit in 0..8u8 {
                let mut flipped = data.clone();
                flipped[byte_idx] ^= 1 << bit;
                assert!(decode_main_frame(&flipped).is_err());
            }
        }
    }

    #[test]
    fn rejects_short_frame() {
        assert!(decode_main_frame(&[0, 0, 0, 1]).is_err());
    }

    #[test]
    fn rejects_id_zero() {
        // tag=0 id=0 count=0 len=0, crc recomputed below
        let mut framed = vec![0u8, 0, 0, 0, 0, 0, 0];
        let crc = calc_crc(&framed);
        framed.extend_from_slice(&crc.to_le_bytes());
        assert_eq!(decode_main_frame(&framed), Err(CodecError::InvalidId(0)));
    }

    fn decode_hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }
}
