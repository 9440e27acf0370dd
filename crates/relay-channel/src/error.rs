#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors produced by `relay-channel`.
///
/// Notes:
/// - The `Invalid*` variants are construction-time only; a channel that was
///   built successfully never returns them.
/// - `Cancelled` is the single cancellation result shared by every blocking
///   operation. Queue-full / queue-empty conditions are never errors — they
///   are expressed as blocking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel capacity must be positive")]
    InvalidCapacity,

    #[error("channel byte capacity must be positive")]
    InvalidByteCapacity,

    #[error("channel buffer size must be positive")]
    InvalidBufferSize,

    #[error("blocking wait cancelled")]
    Cancelled,
}

/// Result type for `relay-channel`.
pub type ChannelResult<T> = Result<T, ChannelError>;
