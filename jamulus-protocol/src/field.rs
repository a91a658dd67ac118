//! The field-kind vocabulary and the `Value` variants that carry decoded
//! field data.

use std::net::Ipv4Addr;

use crate::error::{CodecError, Result};

/// Closed set of wire field kinds understood by the record codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    Ipv4,
    /// 1-byte length prefix + UTF-8 bytes.
    Str1,
    /// 2-byte little-endian length prefix + UTF-8 bytes.
    Str2,
    /// 2-byte little-endian length prefix + opaque bytes.
    Bytes2,
    /// All remaining bytes in the payload.
    Rest,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
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
}

/// A decoded (or to-be-encoded) field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    Ipv4(Ipv4Addr),
    Str(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn as_u8(&self) -> Result<u8> {
        match self {
            Value::U8(v) => Ok(*v),
            _ => Err(mismatch("value", "u8")),
        }
    }

    pub fn as_u16(&self) -> Result<u16> {
        match self {
            Value::U16(v) => Ok(*v),
            _ => Err(mismatch("value", "u16")),
        }
    }

    pub fn as_u32(&self) -> Result<u32> {
        match self {
            Value::U32(v) => Ok(*v),
            _ => Err(mismatch("value", "u32")),
        }
    }

    pub fn as_ipv4(&self) -> Result<Ipv4Addr> {
        match self {
            Value::Ipv4(v) => Ok(*v),
            _ => Err(mismatch("value", "ipv4")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(v) => Ok(v.as_str()),
            _ => Err(mismatch("value", "str")),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Value::Bytes(v) => Ok(v.as_slice()),
            _ => Err(mismatch("value", "bytes")),
        }
    }
}

fn mismatch(field: &'static str, expected: &'static str) -> CodecError {
    CodecError::KindMismatch { field, expected }
}

/// Appends the wire encoding of `value` (which must match `kind`) to `buf`.
pub fn encode_field(kind: FieldKind, value: &Value, buf: &mut Vec<u8>) -> Result<()> {
    match (kind, value) {
        (FieldKind::U8, Value::U8(v)) => buf.push(*v),
        (FieldKind::U16, Value::U16(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::U32, Value::U32(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::Ipv4, Value::Ipv4(v)) => {
            let numeric: u32 = (*v).into();
            buf.extend_from_slice(&numeric.to_le_bytes());
        }
        (FieldKind::Str1, Value::Str(s)) => encode_length_prefixed(s.as_bytes(), 1, buf)?,
        (FieldKind::Str2, Value::Str(s)) => encode_length_prefixed(s.as_bytes(), 2, buf)?,
        (FieldKind::Bytes2, Value::Bytes(b)) => encode_length_prefixed(b, 2, buf)?,
        (FieldKind::Rest, Value::Bytes(b)) => buf.extend_from_slice(b),
        _ => return Err(mismatch("value", kind.describe())),
    }
    Ok(())
}

fn encode_length_prefixed(bytes: &[u8], len_width: u8, buf: &mut Vec<u8>) -> Result<()> {
    let limit: usize = if len_width == 1 {
        u8::MAX as usize
    } else {
        u16::MAX as usize
    };
    if bytes.len() > limit {
        return Err(CodecError::Oversize {
            actual: bytes.len(),
            limit,
        });
    }
    if len_width == 1 {
        buf.push(bytes.len() as u8);
    } else {
        buf.extend_from_slice(&(bytes.len() as u16).to_le_bytes());
    }
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Decodes one field of `kind` starting at `*cursor`, advancing the cursor
/// past it.
pub fn decode_field(kind: FieldKind, buf: &[u8], cursor: &mut usize) -> Result<Value> {
    match kind {
        FieldKind::U8 => Ok(Value::U8(take_bytes(buf, cursor, 1)?[0])),
        FieldKind::U16 => {
            let b = take_bytes(buf, cursor, 2)?;
            Ok(Value::U16(u16::from_le_bytes([b[0], b[1]])))
        }
        FieldKind::U32 => {
            let b = take_bytes(buf, cursor, 4)?;
            Ok(Value::U32(u32::from_le_bytes([b[0], b[1], b[2], b[3]])))
        }
        FieldKind::Ipv4 => {
            let b = take_bytes(buf, cursor, 4)?;
            let numeric = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
            Ok(Value::Ipv4(Ipv4Addr::from(numeric)))
        }
        FieldKind::Str1 => {
            let len = take_bytes(buf, cursor, 1)?[0] as usize;
            let bytes = take_bytes(buf, cursor, len)?;
            Ok(Value::Str(decode_utf8(bytes)?))
        }
        FieldKind::Str2 => {
            let b = take_bytes(buf, cursor, 2)?;
            let len = u16::from_le_bytes([b[0], b[1]]) as usize;
            let bytes = take_bytes(buf, cursor, len)?;
            Ok(Value::Str(decode_utf8(bytes)?))
        }
        FieldKind::Bytes2 => {
            let b = take_bytes(buf, cursor, 2)?;
            let len = u16::from_le_bytes([b[0], b[1]]) as usize;
            let bytes = take_bytes(buf, cursor, len)?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        FieldKind::Rest => {
            let bytes = &buf[*cursor..];
            *cursor = buf.len();
            Ok(Value::Bytes(bytes.to_vec()))
        }
    }
}

fn take_bytes<'a>(buf: &'a [u8], cursor: &mut usize, len: usize) -> Result<&'a [u8]> {
    let start = *cursor;
    let end = start
        .checked_add(len)
        .ok_or_else(|| CodecError::InvalidLength(format!("cursor overflow at {start}")))?;
    if end > buf.len() {
        return Err(CodecError::InvalidLength(format!(
            "need {len} bytes at offset {start}, only {} available",
            buf.len().saturating_sub(start)
        )));
    }
    *cursor = end;
    Ok(&buf[start..end])
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| CodecError::InvalidLength(format!("invalid utf-8 string: {e}")))
}
