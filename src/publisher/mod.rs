//! The `publisher` module implements the fetch-then-publish job.
//!
//! `JokeSource` wraps the HTTP client that talks to the joke API and
//! `Publisher` owns the fixed-rate timer that drives one cycle per tick.
//! A failed cycle is logged and never retried; the next tick is an
//! independent attempt.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::bus::Bus;
use crate::config::{PublisherSettings, Settings};
use crate::joke::Joke;
use crate::utils::{JokeError, Result};

/// HTTP client for the upstream joke API.
#[derive(Debug, Clone)]
pub struct JokeSource {
    http: reqwest::Client,
    endpoint: String,
}

impl JokeSource {
    pub fn new(settings: &PublisherSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(Duration::from_millis(timeout));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Performs one GET against the endpoint and decodes the body.
    ///
    /// A non-2xx status, a body that is not a joke and a literal `null` body
    /// are all errors; nothing is published for them.
    pub async fn fetch(&self) -> Result<Joke> {
        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(JokeError::Status(status));
        }

        let body = response.bytes().await?;
        let joke: Option<Joke> = serde_json::from_slice(&body)?;
        joke.ok_or(JokeError::Empty)
    }
}

pub struct Publisher<B> {
    source: JokeSource,
    bus: B,
    topic: String,
    interval: Duration,
}

impl<B: Bus> Publisher<B> {
    pub fn new(
        source: JokeSource,
        bus: B,
        topic: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            bus,
            topic: topic.into(),
            interval,
        }
    }

    /// Builds the HTTP client from `settings.publisher` and targets the topic
    /// in `settings.redis.pubsub`.
    pub fn from_settings(settings: &Settings, bus: B) -> Result<Self> {
        let source = JokeSource::new(&settings.publisher)?;
        Ok(Self::new(
            source,
            bus,
            settings.redis.pubsub.topic.clone(),
            Duration::from_millis(settings.publisher.interval),
        ))
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Runs a single cycle: fetch one joke and publish it.
    ///
    /// Returns the number of subscribers that received the message.
    pub async fn publish_once(&self) -> Result<usize> {
        let joke = self.source.fetch().await?;
        info!("Sending message: \n{}", joke);

        let payload = joke.to_json()?;
        self.bus.publish(&self.topic, payload).await
    }

    /// Runs cycles at a fixed rate until the future is dropped.
    ///
    /// The first cycle fires immediately. Ticks missed while a slow cycle was
    /// running fire back to back.
    pub async fn run(&self) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

        info!(
            endpoint = self.source.endpoint(),
            topic = %self.topic,
            interval = ?self.interval,
            "Publisher started"
        );

        loop {
            ticker.tick().await;
            match self.publish_once().await {
                Ok(receivers) => debug!(receivers, "Joke published"),
                Err(e) => error!("Publish cycle failed: {}", e),
            }
        }
    }
}
