//! The `error` module defines the error type returned by fetch, publish and
//! subscribe operations.
//!
//! No variant is retried anywhere; the publisher loop logs the error of a
//! failed cycle and waits for the next tick.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JokeError {
    #[error("joke API request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("joke API answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("joke API returned no joke")]
    Empty,

    #[error("invalid joke payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("broker error: {0}")]
    Broker(#[from] redis::RedisError),

    #[error("subscription to topic '{0}' was closed by the broker")]
    Closed(String),
}

pub type Result<T> = std::result::Result<T, JokeError>;
