use thiserror::Error;

/// Errors surfaced by the wire codec.
///
/// Decode errors (`InvalidLength`, `InvalidCrc`, `InvalidId`) describe a
/// malformed datagram; encode errors (`MissingField`, `KindMismatch`,
/// `Oversize`) describe a programming error in the caller building an
/// outbound payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid length: {0}")]
    InvalidLength(String),

    #[error("invalid crc: expected {expected:#06x}, got {actual:#06x}")]
    InvalidCrc { expected: u16, actual: u16 },

    #[error("invalid message id: {0}")]
    InvalidId(u16),

    #[error("missing field '{0}' in outbound payload")]
    MissingField(&'static str),

    #[error("field '{field}' does not match schema kind {expected}")]
    KindMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("datagram of {actual} bytes exceeds the {limit} byte limit")]
    Oversize { actual: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
