//! # jokecast
//!
//! `jokecast` is a small publish/subscribe demo built on Redis pub/sub. A
//! publisher fetches a joke from a public HTTP API on a fixed timer and
//! publishes it on a topic; a subscriber listens on the same topic and prints
//! every joke it receives.
//!
//! ## Core Modules
//!
//! - `joke`: The `Joke` value shared by both sides and its JSON wire form.
//! - `bus`: The `Bus` trait with the Redis and in-process implementations.
//! - `publisher`: The HTTP fetch and the fixed-rate publish loop.
//! - `subscriber`: The message callback and the listen loop.
//! - `config`: Loading settings from a file and environment variables.
//! - `utils`: The crate error type and logging setup.

pub mod bus;
pub mod config;
pub mod joke;
pub mod publisher;
pub mod subscriber;
pub mod utils;
