//! The `utils` module collects the pieces shared by every layer of the
//! handler: error types and logging setup.

pub mod error;
pub mod logging;

pub use error::{EngineError, PayloadError, ServerError};
