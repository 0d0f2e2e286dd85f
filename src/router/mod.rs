//! Message classifier and router
//!
//! Maps an envelope's `type` parameter to a handling path, parses the payload,
//! calls the recommendation engine and builds the response body:
//!
//! | type                     | engine call                       | body                      |
//! |--------------------------|-----------------------------------|---------------------------|
//! | `item_update`            | `update` when the item id is set  | [`ITEM_UPDATE_ACK`]       |
//! | `recommendation_request` | `recommend`                       | recommendation envelope   |
//! | `event_notification`     | `impression` / `click` with item  | [`IMPRESSION_ACK`] / [`CLICK_ACK`], none if the engine fails |
//! | `error_notification`     | none                              | none                      |
//! | anything else            | none                              | none                      |
//!
//! Engine failures are logged and absorbed; the router never returns an
//! error to the transport. A recommendation request always yields a
//! well-formed envelope, empty if need be, and an event notification whose
//! engine call fails gets no body at all.
//!
//! The router holds no mutable state. It is cloned into every request and the
//! engine handle is shared between the clones.

mod message_type;

pub use message_type::MessageType;

use std::sync::Arc;

use tracing::{Span, debug, info, info_span, warn};

use crate::engine::Recommender;
use crate::envelope::{
    Message, NotificationType, parse_event_notification, parse_item_update,
    parse_recommendation_request,
};
use crate::response::{EMPTY_RECOMMENDATIONS, encode_item_ids};

/// Acknowledgement for `item_update`, returned whether or not the update
/// reached the engine.
pub const ITEM_UPDATE_ACK: &str = ";item_update successfull";
pub const IMPRESSION_ACK: &str = "handle impression eventNotification successful";
pub const CLICK_ACK: &str = "handle click eventNotification successful";

#[derive(Clone)]
pub struct Router {
    engine: Arc<dyn Recommender>,
    span: Span,
}

impl Router {
    /// Builds a router around a shared engine.
    ///
    /// Each message is handled in a `route` span whose parent is the caller's
    /// current span (the HTTP request, say) and which follows from `span`.
    pub fn new(engine: Arc<dyn Recommender>, span: Span) -> Self {
        Self { engine, span }
    }

    /// Handles one envelope and returns the response body, if any.
    ///
    /// Runs synchronously and may block on the engine; async callers should
    /// move it onto a blocking thread.
    pub fn handle(&self, message_type: &str, raw_body: Option<&str>) -> Option<String> {
        let span = info_span!(parent: Span::current(), "route", message_type);
        span.follows_from(&self.span);
        let _entered = span.enter();
        info!(message_type, body = raw_body.unwrap_or_default(), "message received");

        match MessageType::from(message_type) {
            MessageType::ItemUpdate => Some(self.item_update(raw_body)),
            MessageType::RecommendationRequest => Some(self.recommendation_request(raw_body)),
            MessageType::EventNotification => self.event_notification(raw_body),
            MessageType::ErrorNotification => {
                warn!(body = raw_body.unwrap_or_default(), "error notification from contest server");
                None
            }
            MessageType::Unknown(kind) => {
                warn!(message_type = %kind, body = raw_body.unwrap_or_default(), "unknown message type");
                None
            }
        }
    }

    fn item_update(&self, raw_body: Option<&str>) -> String {
        let message = parse_item_update(raw_body);
        log_parse_error(&message, "item_update");

        match message.item_id() {
            Some(item_id) => {
                if let Err(e) = self.engine.update(&message) {
                    warn!(item_id, error = %e, "engine rejected item update");
                }
            }
            None => debug!("item_update without item id, engine not called"),
        }

        ITEM_UPDATE_ACK.to_string()
    }

    fn recommendation_request(&self, raw_body: Option<&str>) -> String {
        let message = parse_recommendation_request(raw_body);
        if message.parse_error().is_some() {
            log_parse_error(&message, "recommendation_request");
            return EMPTY_RECOMMENDATIONS.to_string();
        }

        match self.engine.recommend(&message) {
            Ok(items) => {
                if items.is_empty() {
                    debug!("engine returned no recommendations");
                }
                encode_item_ids(&items)
            }
            Err(e) => {
                warn!(error = %e, "recommendation failed, answering with empty result");
                EMPTY_RECOMMENDATIONS.to_string()
            }
        }
    }

    fn event_notification(&self, raw_body: Option<&str>) -> Option<String> {
        let message = parse_event_notification(raw_body);
        log_parse_error(&message, "event_notification");

        let item_id = message.item_id();
        match (message.notification_type(), item_id) {
            (Some(NotificationType::Impression), Some(item_id)) => {
                match self.engine.impression(&message) {
                    Ok(()) => Some(IMPRESSION_ACK.to_string()),
                    Err(e) => {
                        warn!(item_id, error = %e, "engine rejected impression");
                        None
                    }
                }
            }
            (Some(NotificationType::Click), Some(item_id)) => {
                match self.engine.click(&message) {
                    Ok(()) => Some(CLICK_ACK.to_string()),
                    Err(e) => {
                        warn!(item_id, error = %e, "engine rejected click");
                        None
                    }
                }
            }
            (Some(NotificationType::Impression | NotificationType::Click), None) => {
                info!("event notification without item id (message ignored)");
                None
            }
            (Some(NotificationType::Other(kind)), _) => {
                info!(event_type = %kind, "unknown event type (message ignored)");
                None
            }
            (None, _) => {
                info!("event notification without event type (message ignored)");
                None
            }
        }
    }
}

fn log_parse_error(message: &Message, message_type: &str) {
    if let Some(reason) = message.parse_error() {
        debug!(message_type, %reason, "payload could not be parsed");
    }
}
