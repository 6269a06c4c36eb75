//! In-process bus
//!
//! Keeps a registry of topics, each holding the ids of its subscribers, and a
//! map from subscriber id to the sending half of that subscriber's channel.
//! Dropping a `Subscription` removes its subscriber, and a topic left without
//! subscribers is removed with it.

use std::collections::{HashMap, HashSet};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;
use uuid::Uuid;

use super::{Bus, Subscription};
use crate::utils::Result;

pub type SubscriberId = String;

#[derive(Debug, Default)]
struct Topic {
    subscribers: HashSet<SubscriberId>,
}

#[derive(Debug, Default)]
struct Registry {
    topics: HashMap<String, Topic>,
    senders: HashMap<SubscriberId, UnboundedSender<Vec<u8>>>,
}

impl Registry {
    fn subscribe(&mut self, topic: &str, sender: UnboundedSender<Vec<u8>>) -> SubscriberId {
        let id = format!("subscriber-{}", Uuid::new_v4());
        self.topics
            .entry(topic.to_string())
            .or_default()
            .subscribers
            .insert(id.clone());
        self.senders.insert(id.clone(), sender);
        id
    }

    fn publish(&mut self, topic: &str, payload: Vec<u8>) -> usize {
        let Some(entry) = self.topics.get(topic) else {
            debug!(topic, "No subscribers for topic");
            return 0;
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        for id in &entry.subscribers {
            match self.senders.get(id) {
                Some(sender) if sender.send(payload.clone()).is_ok() => delivered += 1,
                _ => closed.push(id.clone()),
            }
        }

        for id in closed {
            self.remove_subscriber(&id);
        }
        delivered
    }

    fn remove_subscriber(&mut self, id: &SubscriberId) {
        self.senders.remove(id);
        self.topics.retain(|_, topic| {
            topic.subscribers.remove(id);
            !topic.subscribers.is_empty()
        });
        debug!(subscriber = %id, "Removed subscriber");
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Receiving half of one subscriber. Unregisters itself when dropped.
struct Inbox {
    id: SubscriberId,
    rx: UnboundedReceiver<Vec<u8>>,
    registry: Weak<Mutex<Registry>>,
}

impl Stream for Inbox {
    type Item = Vec<u8>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Vec<u8>>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl Drop for Inbox {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).remove_subscriber(&self.id);
        }
    }
}

/// A `Bus` whose topics live in this process. Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryBus {
    registry: Arc<Mutex<Registry>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscribers currently registered on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.lock()
            .topics
            .get(topic)
            .map_or(0, |t| t.subscribers.len())
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        lock(&self.registry)
    }
}

impl Bus for MemoryBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<usize> {
        Ok(self.lock().publish(topic, payload))
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.lock().subscribe(topic, tx);
        debug!(topic, subscriber = %id, "Subscribed");

        let inbox = Inbox {
            id,
            rx,
            registry: Arc::downgrade(&self.registry),
        };
        Ok(Subscription::new(topic, inbox))
    }
}
