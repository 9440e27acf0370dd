#![forbid(unsafe_code)]

use crate::{
    error::ChannelResult,
    item::{Item, Record},
};

/// Transport buffer between pipeline stages.
///
/// Implementations are shared by producer and consumer threads; every
/// operation takes `&self`. Capacity exhaustion is expressed as blocking,
/// never as an error, so the only blocking-path failure is cancellation.
///
/// A consumer loop calls [`pull`](Channel::pull) or
/// [`pull_all`](Channel::pull_all) repeatedly and must stop iterating when it
/// observes [`Item::EndOfStream`], then propagate shutdown downstream.
pub trait Channel<R: Record>: Send + Sync {
    /// Enqueue one record, blocking while the channel is at item capacity.
    ///
    /// Gated only on the slot dimension; the byte dimension is enforced by
    /// [`push_all`](Channel::push_all) admission. The record's byte size is
    /// still added to the occupancy counter so batch admission observes it.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`](crate::ChannelError::Cancelled) if the channel's
    /// cancellation token fires.
    fn push(&self, record: R) -> ChannelResult<()>;

    /// Enqueue an entire batch atomically: either every record is admitted in
    /// one step or none are. Blocks until both the slot dimension and the
    /// byte dimension can accommodate the whole batch.
    ///
    /// On success the caller's vec is drained into the channel. On error it
    /// is left untouched, so no record is ever lost to a failed admission.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`](crate::ChannelError::Cancelled) if the channel's
    /// cancellation token fires; the batch is not admitted.
    fn push_all(&self, records: &mut Vec<R>) -> ChannelResult<()>;

    /// Dequeue exactly one item, blocking until one is available.
    ///
    /// Once the channel is closed and drained, returns
    /// [`Item::EndOfStream`] without blocking — every consumer still pulling
    /// observes termination, not only the one that dequeued the marker.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`](crate::ChannelError::Cancelled) if the channel's
    /// cancellation token fires.
    fn pull(&self) -> ChannelResult<Item<R>>;

    /// Clear `dest`, block until at least one item is available, then move up
    /// to `buffer_size` currently-queued items into `dest` in one step.
    ///
    /// Once the channel is closed and drained, `dest` receives a single
    /// [`Item::EndOfStream`] without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`](crate::ChannelError::Cancelled) if the channel's
    /// cancellation token fires; `dest` is left cleared.
    fn pull_all(&self, dest: &mut Vec<Item<R>>) -> ChannelResult<()>;

    /// Signal end-of-stream. Idempotent: the first call enqueues one
    /// [`Item::EndOfStream`] marker (exempt from both capacity dimensions)
    /// and wakes blocked consumers; later calls are no-ops.
    fn close(&self);

    /// Current queued item count, including a queued end-of-stream marker.
    /// Non-blocking; may be momentarily stale under concurrent mutation.
    fn len(&self) -> usize;

    /// Whether the queue is currently empty. Non-blocking; may be momentarily
    /// stale under concurrent mutation.
    fn is_empty(&self) -> bool;
}
