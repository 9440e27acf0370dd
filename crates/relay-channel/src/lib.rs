#![forbid(unsafe_code)]

//! `relay-channel`
//!
//! Bounded in-process transport between pipeline stages.
//!
//! A producer stage pushes records into a channel; a consumer stage pulls
//! them until it observes [`Item::EndOfStream`]. The channel owns no threads
//! of its own — it is passive synchronized state shared by whichever threads
//! call it.
//!
//! Memory is bounded along two independent dimensions:
//! - `capacity`: maximum number of queued items
//! - `byte_capacity`: maximum aggregate queued byte size (enforced by batch
//!   admission)
//!
//! Capacity exhaustion is never an error, only backpressure: producers block
//! until consumers free room. The only blocking-path error is
//! [`ChannelError::Cancelled`], surfaced uniformly from every blocking
//! operation when the channel's [`CancellationToken`] fires.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

mod channel;
mod error;
mod item;
mod memory;
mod options;

pub use channel::Channel;
pub use error::{ChannelError, ChannelResult};
pub use item::{Item, Record};
pub use memory::MemoryChannel;
pub use options::ChannelOptions;
