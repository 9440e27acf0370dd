use relay_channel::{ChannelOptions, MemoryChannel, Record};
use tokio_util::sync::CancellationToken;

/// Record with an explicit reported size, independent of payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    pub id: u32,
    size: u64,
}

impl TestRecord {
    pub fn sized(id: u32, size: u64) -> Self {
        Self { id, size }
    }
}

impl Record for TestRecord {
    fn byte_size(&self) -> u64 {
        self.size
    }
}

pub fn channel(capacity: usize, byte_capacity: u64, buffer_size: usize) -> MemoryChannel<TestRecord> {
    MemoryChannel::new(
        ChannelOptions {
            capacity,
            byte_capacity,
            buffer_size,
        },
        CancellationToken::new(),
    )
    .expect("valid test options")
}
