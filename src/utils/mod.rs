//! The `utils` module holds the pieces shared by both processes: the crate
//! error type and the tracing setup.

pub mod error;
pub mod logging;

pub use error::{JokeError, Result};
