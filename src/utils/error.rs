//! The `error` module defines the error types shared across the crate.
//!
//! None of these errors ever reach the contest server: the router absorbs
//! payload and engine failures, and the transport answers every request with
//! status 200. They exist so each layer can log *why* it fell back.

use thiserror::Error;

/// Why a payload could not be turned into a populated `Message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("empty payload")]
    Empty,

    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Failure reported by a recommendation engine call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("message is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("engine state unavailable: {0}")]
    Unavailable(String),

    #[error("engine failure: {0}")]
    Internal(String),
}

/// Errors raised while running the HTTP listener.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("listener i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http server error: {0}")]
    Http(#[from] hyper::Error),
}
