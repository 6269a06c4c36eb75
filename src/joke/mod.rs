use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::Result;

/// A joke as carried over the wire between the publisher and the subscriber.
///
/// The JSON form is exactly the two fields with no envelope, which is also
/// the shape the upstream joke API answers with. Unknown fields in incoming
/// documents are ignored.
///
/// # Example
///
/// ```rust
/// use jokecast::joke::Joke;
///
/// let joke = Joke::new("Why?", "Because.");
/// assert_eq!(joke.to_string(), "Q: Why? \nA: Because.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

impl Joke {
    pub fn new(setup: impl Into<String>, punchline: impl Into<String>) -> Self {
        Self {
            setup: setup.into(),
            punchline: punchline.into(),
        }
    }

    /// Encodes the joke as the JSON payload published on the topic.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a payload received from the topic.
    pub fn from_json(payload: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(payload)?)
    }
}

impl fmt::Display for Joke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q: {} \nA: {}", self.setup, self.punchline)
    }
}
