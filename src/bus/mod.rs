//! The `bus` module is the seam between the two processes and the message
//! broker.
//!
//! A `Bus` publishes raw payloads on a named topic and hands out
//! `Subscription`s that yield every payload delivered on a topic. Two
//! implementations exist:
//!
//! - `RedisBus`: Redis `PUBLISH` / `SUBSCRIBE`, used by the `publisher` and
//!   `subscriber` commands.
//! - `MemoryBus`: an in-process topic registry used by the `local` command
//!   and by tests.
//!
//! Delivery guarantees are whatever the implementation gives: Redis pub/sub is
//! fire-and-forget, so a message published while nobody listens is gone.

use std::fmt;
use std::future::Future;

use futures::stream::{BoxStream, Stream, StreamExt};

use crate::utils::Result;

pub mod memory;
pub mod redis_bus;

pub use memory::MemoryBus;
pub use redis_bus::RedisBus;

pub trait Bus {
    /// Publishes `payload` on `topic` and returns how many subscribers
    /// received it.
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<usize>> + Send;

    /// Subscribes to `topic`. Delivery starts as soon as the returned future
    /// resolves.
    fn subscribe(&self, topic: &str) -> impl Future<Output = Result<Subscription>> + Send;
}

/// A live subscription to one topic.
///
/// Dropping it ends the subscription.
pub struct Subscription {
    topic: String,
    stream: BoxStream<'static, Vec<u8>>,
}

impl Subscription {
    pub fn new(
        topic: impl Into<String>,
        stream: impl Stream<Item = Vec<u8>> + Send + 'static,
    ) -> Self {
        Self {
            topic: topic.into(),
            stream: stream.boxed(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Waits for the next payload. `None` means the broker side is gone.
    pub async fn next(&mut self) -> Option<Vec<u8>> {
        self.stream.next().await
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}
