//! Error types for replication plumbing.

/// Errors raised while decoding a snapshot payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Truncated payload: needed {needed} more bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },

    #[error("Invalid bool byte: {0:#04x}")]
    InvalidBool(u8),

    #[error("{0} trailing bytes after snapshot")]
    TrailingBytes(usize),

    #[error("Stroke coordinate is not finite")]
    NonFiniteCoord,
}

/// Errors raised while sending over a transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("No peers subscribed to the transport")]
    NoSubscribers,
}
