//! The `transport` module is responsible for network communication with the
//! contest server over HTTP.
//!
//! It implements the listener, the rules for which requests reach the router
//! at all, parameter extraction, and the fixed response framing.

pub mod http;
pub mod params;

pub use http::{INFO_PAGE, handle_request, serve, start_http_server};
pub use params::EnvelopeParams;
