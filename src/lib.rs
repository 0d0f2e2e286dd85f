//! # plista-challenge
//!
//! `plista-challenge` is the message-handling boundary of a participant in the
//! plista news recommendation contest. The contest server POSTs JSON envelopes
//! over HTTP; this crate classifies them, hands the payload to a
//! recommendation engine and answers in the exact format the server expects.
//!
//! ## Core Modules
//!
//! - `envelope`: Parses JSON payloads into read-only `Message` values.
//! - `router`: Classifies envelopes by type and drives the engine.
//! - `response`: Encodes recommendation results into the contest wire format.
//! - `engine`: The `Recommender` trait plus a small in-memory reference engine.
//! - `transport`: The HTTP listener the contest server talks to.
//! - `config`: Loads server and engine settings.
//! - `utils`: Error types and logging setup.

pub mod config;
pub mod engine;
pub mod envelope;
pub mod response;
pub mod router;
pub mod transport;
pub mod utils;
