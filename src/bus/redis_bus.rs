//! Redis-backed bus
//!
//! Publishing goes through a `ConnectionManager` shared by every caller. When
//! the server drops the connection the failing `PUBLISH` returns an error and
//! the manager reconnects in the background, so a later publish can succeed
//! without restarting the process. Each subscription opens its own pub/sub
//! connection, since a Redis connection in subscribed state cannot issue
//! other commands.

use futures::StreamExt;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::info;

use super::{Bus, Subscription};
use crate::config::RedisSettings;
use crate::utils::Result;

#[derive(Clone)]
pub struct RedisBus {
    client: redis::Client,
    connection: ConnectionManager,
}

impl RedisBus {
    /// Opens the client and the shared publishing connection.
    pub async fn connect(settings: &RedisSettings) -> Result<Self> {
        let client = redis::Client::open(settings.connection_info())?;
        let connection = ConnectionManager::new(client.clone()).await?;
        info!(
            host = %settings.host,
            port = settings.port,
            "Connected to Redis"
        );
        Ok(Self { client, connection })
    }
}

impl Bus for RedisBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<usize> {
        let mut connection = self.connection.clone();
        let receivers: usize = connection.publish(topic, payload).await?;
        Ok(receivers)
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription> {
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(topic).await?;

        let stream = pubsub
            .into_on_message()
            .map(|msg| msg.get_payload_bytes().to_vec());
        Ok(Subscription::new(topic, stream))
    }
}

impl std::fmt::Debug for RedisBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBus")
            .field("client", &"redis::Client")
            .finish()
    }
}
