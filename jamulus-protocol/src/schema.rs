//! Record-level codec: a schema is an ordered list of `(field name, kind)`
//! pairs; a record is a name→value map decoded (or to be encoded) against
//! one.

use std::collections::HashMap;

use crate::error::{CodecError, Result};
use crate::field::{decode_field, encode_field, FieldKind, Value};

/// An ordered field layout, known statically per message kind.
pub type Schema = &'static [(&'static str, FieldKind)];

/// A single decoded message record, keyed by schema field name.
pub type Record = HashMap<&'static str, Value>;

/// Either one record or a homogeneous list of them, depending on whether
/// the message kind is repeatable.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Single(Record),
    List(Vec<Record>),
}

impl Payload {
    pub fn as_single(&self) -> Result<&Record> {
        match self {
            Payload::Single(r) => Ok(r),
            Payload::List(_) => Err(CodecError::KindMismatch {
                field: "payload",
                expected: "single record",
            }),
        }
    }

    pub fn as_list(&self) -> Result<&[Record]> {
        match self {
            Payload::List(r) => Ok(r),
            Payload::Single(_) => Err(CodecError::KindMismatch {
                field: "payload",
                expected: "record list",
            }),
        }
    }
}

/// Builds an empty record for a schema with no fields (e.g. `REQ_*`
/// messages).
pub fn empty_record() -> Record {
    Record::new()
}

/// Encodes `record` against `schema`, writing fields in schema order.
pub fn encode_record(schema: Schema, record: &Record) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for (name, kind) in schema {
        let value = record.get(name).ok_or(CodecError::MissingField(name))?;
        encode_field(*kind, value, &mut buf).map_err(|_| CodecError::KindMismatch {
            field: name,
            expected: describe(*kind),
        })?;
    }
    Ok(buf)
}

/// Decodes a single record against `schema` starting at `*cursor`.
pub fn decode_record_at(schema: Schema, buf: &[u8], cursor: &mut usize) -> Result<Record> {
    let mut record = Record::with_capacity(schema.len());
    for (name, kind) in schema {
        let value = decode_field(*kind, buf, cursor)?;
        record.insert(*name, value);
    }
    Ok(record)
}

/// Decodes a single, non-repeating record; it is an error for bytes to
/// remain after the schema's last field.
pub fn decode_record(schema: Schema, buf: &[u8]) -> Result<Record> {
    let mut cursor = 0;
    let record = decode_record_at(schema, buf, &mut cursor)?;
    if cursor != buf.len() {
        return Err(CodecError::InvalidLength(format!(
            "{} unread bytes after record",
            buf.len() - cursor
        )));
    }
    Ok(record)
}

/// Decodes a repeated message body: records back to back until the buffer
/// is exactly consumed. A partial trailing record is an error.
pub fn decode_repeated(schema: Schema, buf: &[u8]) -> Result<Vec<Record>> {
    let mut cursor = 0;
    let mut out = Vec::new();
    while cursor != buf.len() {
        out.push(decode_record_at(schema, buf, &mut cursor)?);
    }
    Ok(out)
}

/// Encodes a repeated message body by concatenating each record's encoding.
pub fn encode_repeated(schema: Schema, records: &[Record]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for record in records {
        buf.extend(encode_record(schema, record)?);
    }
    Ok(buf)
}

fn describe(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::U8 => "u8",
        FieldKind::U16 => "u16",
        FieldKind::U32 => "u32",
        FieldKind::Ipv4 => "ipv4",
        FieldKind::Str1 => "str1",
        FieldKind::Str2 => "str2",
        FieldKind::Bytes2 => "bytes2",
        FieldKind::Rest => "rest",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIPLE: Schema = &[("a", FieldKind::U32), ("b", FieldKind::U16), ("c", FieldKind::U8)];

    #[test]
    fn pack_matches_reference_vector() {
        let mut record = Record::new();
        record.insert("a", Value::U32(1));
        record.insert("b", Value::U16(2));
        record.insert("c", Value::U8(3));
        let encoded = encode_record(TRIPLE, &record).unwrap();
        assert_eq!(hex(&encoded), "01000000020003");
    }

    #[test]
    fn unpack_matches_reference_vector() {
        let buf = [0x01, 0, 0, 0, 0x02, 0, 0x03];
        let record = decode_record(TRIPLE, &buf).unwrap();
        assert_eq!(record["a"], Value::U32(1));
        assert_eq!(record["b"], Value::U16(2));
        assert_eq!(record["c"], Value::U8(3));
    }

    #[test]
    fn round_trip_is_identity() {
        let mut record = Record::new();
        record.insert("a", Value::U32(424242));
        record.insert("b", Value::U16(12));
        record.insert("c", Value::U8(9));
        let encoded = encode_record(TRIPLE, &record).unwrap();
        let decoded = decode_record(TRIPLE, &encoded).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn missing_field_is_an_error() {
        let record = Record::new();
        assert!(matches!(
            encode_record(TRIPLE, &record),
            Err(CodecError::MissingField("a"))
        ));
    }

    #[test]
    fn trailing_bytes_are_an_error() {
        let buf = [0x01, 0, 0, 0, 0x02, 0, 0x03, 0xff];
        assert!(decode_record(TRIPLE, &buf).is_err());
    }

    #[test]
    fn repeated_round_trip_and_partial_trailer_rejected() {
        let mut r1 = Record::new();
        r1.insert("a", Value::U8(1));
        let mut r2 = Record::new();
        r2.insert("a", Value::U8(2));
        const SINGLE: Schema = &[("a", FieldKind::U8)];
        let encoded = encode_repeated(SINGLE, &[r1.clone(), r2.clone()]).unwrap();
        assert_eq!(decode_repeated(SINGLE, &encoded).unwrap(), vec![r1, r2]);

        let mut truncated = encoded.clone();
        truncated.push(0); // not a valid third U8-only record boundary mismatch needs >1 byte schema to show partial trailer
        const WIDE: Schema = &[("a", FieldKind::U16)];
        let wide_encoded = encode_repeated(WIDE, &[{
            let mut r = Record::new();
            r.insert("a", Value::U16(7));
            r
        }])
        .unwrap();
        let mut partial = wide_encoded;
        partial.push(0); // one extra byte: half a trailing record
        assert!(decode_repeated(WIDE, &partial).is_err());
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
