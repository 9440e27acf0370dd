#![forbid(unsafe_code)]

//! In-memory bounded channel.
//!
//! `MemoryChannel<R>` realizes the [`Channel`] contract with a `VecDeque`
//! guarded by a single `Mutex`, two `Condvar`s (space / data) and a byte
//! counter. All mutation of queue, byte counter and closed flag happens under
//! the one lock, so batch admission and single-item operations observe a
//! consistent view of both capacity dimensions.

use std::{collections::VecDeque, fmt, sync::Arc, time::Duration};

use parking_lot::{Condvar, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::{
    channel::Channel,
    error::{ChannelError, ChannelResult},
    item::{Item, Record},
    options::ChannelOptions,
};

/// Liveness tick for blocking waits. Condvar notification is the primary wake
/// path; the tick bounds recovery from a missed signal and bounds how long
/// cancellation can go unobserved. Not a caller-visible timeout.
const LIVENESS_TICK: Duration = Duration::from_millis(200);

/// Internal state protected by Mutex.
struct State<R> {
    queue: VecDeque<Item<R>>,
    occupied_bytes: u64,
    closed: bool,
}

struct Inner<R> {
    state: Mutex<State<R>>,
    /// Signalled when space may have become available (dequeue side).
    space: Condvar,
    /// Signalled when data may have become available (enqueue side).
    data: Condvar,
    capacity: usize,
    byte_capacity: u64,
    buffer_size: usize,
    cancel: CancellationToken,
}

/// Bounded in-memory channel.
///
/// Cheap `Clone` handle; producer and consumer threads clone the same channel
/// and operate on shared state. The channel owns no threads.
pub struct MemoryChannel<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for MemoryChannel<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> fmt::Debug for MemoryChannel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("MemoryChannel")
            .field("len", &state.queue.len())
            .field("occupied_bytes", &state.occupied_bytes)
            .field("closed", &state.closed)
            .finish()
    }
}

impl<R: Record> MemoryChannel<R> {
    /// Create a new open channel with fixed capacities.
    ///
    /// The backing queue provisions `capacity + 1` slots: the extra slot is
    /// headroom for the close-time end-of-stream marker, so `close()` can
    /// never deadlock against a full buffer.
    ///
    /// # Errors
    ///
    /// Returns an `Invalid*` error if any option is zero.
    pub fn new(options: ChannelOptions, cancel: CancellationToken) -> ChannelResult<Self> {
        options.validate()?;
        debug!(
            capacity = options.capacity,
            byte_capacity = options.byte_capacity,
            buffer_size = options.buffer_size,
            "memory channel created"
        );
        Ok(Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    queue: VecDeque::with_capacity(options.capacity + 1),
                    occupied_bytes: 0,
                    closed: false,
                }),
                space: Condvar::new(),
                data: Condvar::new(),
                capacity: options.capacity,
                byte_capacity: options.byte_capacity,
                buffer_size: options.buffer_size,
                cancel,
            }),
        })
    }

    /// Current aggregate byte size of queued items. Non-blocking; may be
    /// momentarily stale under concurrent mutation.
    pub fn occupied_bytes(&self) -> u64 {
        let state = self.inner.state.lock();
        state.occupied_bytes
    }

    fn ensure_live(&self) -> ChannelResult<()> {
        if self.inner.cancel.is_cancelled() {
            return Err(ChannelError::Cancelled);
        }
        Ok(())
    }
}

impl<R: Record + Send> Channel<R> for MemoryChannel<R> {
    #[expect(clippy::significant_drop_tightening)] // lock must be held for condvar.wait_for
    fn push(&self, record: R) -> ChannelResult<()> {
        let bytes = record.byte_size();
        let mut state = self.inner.state.lock();
        loop {
            self.ensure_live()?;
            // Slot dimension only. Byte capacity is enforced by batch
            // admission; single-push bytes still land in the counter so
            // batches observe them.
            if state.queue.len() < self.inner.capacity {
                break;
            }
            self.inner.space.wait_for(&mut state, LIVENESS_TICK);
        }
        state.queue.push_back(Item::Data(record));
        state.occupied_bytes += bytes;
        drop(state);
        self.inner.data.notify_all();
        Ok(())
    }

    #[expect(clippy::significant_drop_tightening)] // lock must be held for condvar.wait_for
    fn push_all(&self, records: &mut Vec<R>) -> ChannelResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let batch_len = records.len();
        let batch_bytes: u64 = records.iter().map(Record::byte_size).sum();

        if batch_len > self.inner.capacity || batch_bytes > self.inner.byte_capacity {
            warn!(
                batch_len,
                batch_bytes, "batch exceeds total channel capacity; admission blocks until cancelled"
            );
        }

        let mut state = self.inner.state.lock();
        loop {
            self.ensure_live()?;
            let free_slots = self.inner.capacity.saturating_sub(state.queue.len());
            if state.occupied_bytes + batch_bytes <= self.inner.byte_capacity
                && batch_len <= free_slots
            {
                break;
            }
            self.inner.space.wait_for(&mut state, LIVENESS_TICK);
        }
        // Whole batch in one locked step; partial admission is never
        // observable.
        state.queue.extend(records.drain(..).map(Item::Data));
        state.occupied_bytes += batch_bytes;
        drop(state);
        self.inner.data.notify_all();
        Ok(())
    }

    #[expect(clippy::significant_drop_tightening)] // lock must be held for condvar.wait_for
    fn pull(&self) -> ChannelResult<Item<R>> {
        let mut state = self.inner.state.lock();
        loop {
            self.ensure_live()?;
            if let Some(item) = state.queue.pop_front() {
                state.occupied_bytes = state.occupied_bytes.saturating_sub(item.byte_size());
                drop(state);
                self.inner.space.notify_all();
                return Ok(item);
            }
            if state.closed {
                // Sticky end-of-stream: closed and drained. Later consumers
                // observe termination without blocking.
                return Ok(Item::EndOfStream);
            }
            self.inner.data.wait_for(&mut state, LIVENESS_TICK);
        }
    }

    #[expect(clippy::significant_drop_tightening)] // lock must be held for condvar.wait_for
    fn pull_all(&self, dest: &mut Vec<Item<R>>) -> ChannelResult<()> {
        dest.clear();
        let mut state = self.inner.state.lock();
        loop {
            self.ensure_live()?;
            if !state.queue.is_empty() {
                let drain = state.queue.len().min(self.inner.buffer_size);
                for _ in 0..drain {
                    let Some(item) = state.queue.pop_front() else {
                        break;
                    };
                    state.occupied_bytes = state.occupied_bytes.saturating_sub(item.byte_size());
                    dest.push(item);
                }
                drop(state);
                self.inner.space.notify_all();
                return Ok(());
            }
            if state.closed {
                dest.push(Item::EndOfStream);
                return Ok(());
            }
            self.inner.data.wait_for(&mut state, LIVENESS_TICK);
        }
    }

    fn close(&self) {
        {
            let mut state = self.inner.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            // Headroom slot: the marker bypasses both capacity dimensions and
            // byte accounting, so a consumer blocked in pull/pull_all is
            // unblocked by an actual insertion rather than a timeout.
            state.queue.push_back(Item::EndOfStream);
        }
        trace!("channel closed");
        self.inner.data.notify_all();
    }

    fn len(&self) -> usize {
        let state = self.inner.state.lock();
        state.queue.len()
    }

    fn is_empty(&self) -> bool {
        let state = self.inner.state.lock();
        state.queue.is_empty()
    }
}
