use jamulus_protocol::CodecError;
use thiserror::Error;

/// Errors surfaced by the UDP endpoint.
#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wire codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("receive timed out")]
    Timeout,

    #[error("datagram of {actual} bytes exceeds the {limit} byte limit")]
    Oversize { actual: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, EndpointError>;
