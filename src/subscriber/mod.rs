//! The `subscriber` module turns delivered payloads back into jokes.
//!
//! `listen` drives a `Subscription` and hands every payload to a plain
//! callback; `on_message` is the callback the `subscriber` command uses.

use std::io::Write;

use tracing::{error, info, warn};

use crate::bus::Subscription;
use crate::joke::Joke;
use crate::utils::{JokeError, Result};

/// Decodes one payload and writes its rendering to `out`.
///
/// A payload that is not a joke is logged and dropped.
pub fn on_message<W: Write>(payload: &[u8], out: &mut W) {
    let joke = match Joke::from_json(payload) {
        Ok(joke) => joke,
        Err(e) => {
            error!("error while parsing message: {}", e);
            return;
        }
    };

    if let Err(e) = writeln!(out, "{joke}") {
        warn!("Failed to write joke: {}", e);
    }
}

/// Feeds every payload of `subscription` to `handler`.
///
/// The subscription is expected to last for the life of the process, so this
/// only returns when the broker side closes it, with `JokeError::Closed`.
pub async fn listen<F>(mut subscription: Subscription, mut handler: F) -> Result<()>
where
    F: FnMut(&[u8]),
{
    info!(topic = subscription.topic(), "Listening for jokes");

    while let Some(payload) = subscription.next().await {
        handler(&payload);
    }

    warn!(topic = subscription.topic(), "Subscription closed");
    Err(JokeError::Closed(subscription.topic().to_string()))
}

#[cfg(test)]
mod tests;
