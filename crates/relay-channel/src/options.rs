#![forbid(unsafe_code)]

use crate::error::{ChannelError, ChannelResult};

/// Construction parameters for a channel. All three are fixed for the
/// lifetime of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOptions {
    /// Maximum number of queued items. The backing storage provisions one
    /// extra slot internally for the close-time end-of-stream marker.
    pub capacity: usize,
    /// Maximum aggregate queued byte size, enforced by batch admission.
    pub byte_capacity: u64,
    /// Maximum items moved out by one `pull_all` call.
    pub buffer_size: usize,
}

impl Default for ChannelOptions {
    fn default() -> Self {
        Self {
            capacity: 2048,
            byte_capacity: 8 * 1024 * 1024,
            buffer_size: 32,
        }
    }
}

impl ChannelOptions {
    /// Reject non-positive parameters. Fatal to channel creation.
    pub(crate) fn validate(&self) -> ChannelResult<()> {
        if self.capacity == 0 {
            return Err(ChannelError::InvalidCapacity);
        }
        if self.byte_capacity == 0 {
            return Err(ChannelError::InvalidByteCapacity);
        }
        if self.buffer_size == 0 {
            return Err(ChannelError::InvalidBufferSize);
        }
        Ok(())
    }
}
