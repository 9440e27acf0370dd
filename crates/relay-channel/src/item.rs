#![forbid(unsafe_code)]

use bytes::Bytes;

/// Byte-size capability supplied by the record-producing stage.
///
/// The channel treats records as opaque: it never inspects payload content,
/// only the reported size. Implementations should be cheap and deterministic —
/// the channel reads the size once on enqueue and once on dequeue and expects
/// the two to agree.
pub trait Record {
    /// Aggregate byte size of this record.
    fn byte_size(&self) -> u64;
}

impl Record for Bytes {
    fn byte_size(&self) -> u64 {
        self.len() as u64
    }
}

impl Record for Vec<u8> {
    fn byte_size(&self) -> u64 {
        self.len() as u64
    }
}

/// Element type carried by a channel.
///
/// End-of-stream travels in-band through the same queue as data, but as an
/// explicit variant rather than a sentinel value, so every consumption site
/// is forced to handle both cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<R> {
    /// A data record, owned by the channel while queued.
    Data(R),
    /// No further records will arrive. Contributes zero bytes.
    EndOfStream,
}

impl<R: Record> Item<R> {
    /// Byte size charged against the channel's byte capacity.
    pub fn byte_size(&self) -> u64 {
        match self {
            Self::Data(record) => record.byte_size(),
            Self::EndOfStream => 0,
        }
    }
}

impl<R> Item<R> {
    /// Whether this item signals stream termination.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    /// Unwrap the record, or `None` for end-of-stream.
    pub fn into_data(self) -> Option<R> {
        match self {
            Self::Data(record) => Some(record),
            Self::EndOfStream => None,
        }
    }
}
