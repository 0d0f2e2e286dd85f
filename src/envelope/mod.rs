//! The `envelope` module turns the JSON payload of a contest-server envelope
//! into a typed, read-only [`Message`].
//!
//! Parsing never fails: missing fields stay unset and a payload that is empty
//! or not a JSON object produces a `Message` whose
//! [`parse_error`](Message::parse_error) explains why. Deciding what to do
//! with such a message is the router's job.

mod message;
mod parser;

pub use message::{DomainId, ItemId, Message, NotificationType, RequestContext, UserId};
pub use parser::{parse_event_notification, parse_item_update, parse_recommendation_request};
