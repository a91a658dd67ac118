//! Bit-exact wire codec for the Jamulus low-latency audio conferencing
//! protocol: CRC, field and record encoding, the static message catalog,
//! and the main-frame wrapper that ties them together.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod crc;
pub mod error;
pub mod field;
pub mod frame;
pub mod schema;
pub mod tables;

pub use catalog::{by_id, by_name, requires_ack, MessageDef, ACKN_ID, CLM_START};
pub use crc::calc_crc;
pub use error::{CodecError, Result};
pub use field::{FieldKind, Value};
pub use frame::{decode_audio, decode_main_frame, encode_audio, encode_main_frame, DecodedFrame, MAX_DATAGRAM_BYTES};
pub use schema::{empty_record, Payload, Record, Schema};
