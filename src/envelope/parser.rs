//! Field extraction for the three payload-carrying message types.
//!
//! Every function here is total: an empty or malformed payload yields a
//! `Message` with all fields unset and `parse_error` recorded.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::message::{ItemId, Message, NotificationType, RequestContext};
use crate::utils::error::PayloadError;

// Keys of the `context.simple` vector in contest payloads.
const SIMPLE_ITEM: &str = "25";
const SIMPLE_DOMAIN: &str = "27";
const SIMPLE_USER: &str = "57";

const ITEM_SLOT: &str = "3";

type Object = Map<String, Value>;

/// Parses an `item_update` payload: item, domain, timestamp and article text.
pub fn parse_item_update(raw: Option<&str>) -> Message {
    let object = match parse_object(raw) {
        Ok(object) => object,
        Err(reason) => return Message::unparsed(reason),
    };

    Message {
        item_id: item_id(&object),
        domain_id: domain_id(&object),
        timestamp: timestamp(&object),
        title: string_field(&object, "title"),
        text: string_field(&object, "text"),
        url: string_field(&object, "url"),
        ..Message::default()
    }
}

/// Parses a `recommendation_request` payload into a message carrying a
/// [`RequestContext`].
pub fn parse_recommendation_request(raw: Option<&str>) -> Message {
    let object = match parse_object(raw) {
        Ok(object) => object,
        Err(reason) => return Message::unparsed(reason),
    };

    Message {
        item_id: item_id(&object),
        domain_id: domain_id(&object),
        timestamp: timestamp(&object),
        request_context: Some(request_context(&object)),
        ..Message::default()
    }
}

/// Parses an `event_notification` payload. The notification sub-type comes
/// from the top-level `type` field.
pub fn parse_event_notification(raw: Option<&str>) -> Message {
    let object = match parse_object(raw) {
        Ok(object) => object,
        Err(reason) => return Message::unparsed(reason),
    };

    Message {
        item_id: item_id(&object),
        domain_id: domain_id(&object),
        notification_type: object
            .get("type")
            .and_then(Value::as_str)
            .map(NotificationType::from),
        timestamp: timestamp(&object),
        request_context: Some(request_context(&object)),
        recommended_items: recommended_items(&object),
        ..Message::default()
    }
}

fn parse_object(raw: Option<&str>) -> Result<Object, PayloadError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(PayloadError::Empty);
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(PayloadError::NotAnObject(kind(&other))),
        Err(e) => Err(PayloadError::Malformed(e.to_string())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accepts JSON integers and strings holding a base-10 integer.
fn integer_like(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn simple(object: &Object, key: &str) -> Option<i64> {
    object
        .get("context")
        .and_then(|context| context.get("simple"))
        .and_then(|simple| simple.get(key))
        .and_then(integer_like)
}

fn item_id(object: &Object) -> Option<ItemId> {
    object
        .get("id")
        .and_then(integer_like)
        .or_else(|| simple(object, SIMPLE_ITEM))
}

fn domain_id(object: &Object) -> Option<i64> {
    object
        .get("domainid")
        .and_then(integer_like)
        .or_else(|| simple(object, SIMPLE_DOMAIN))
}

fn timestamp(object: &Object) -> Option<DateTime<Utc>> {
    object
        .get("timestamp")
        .and_then(integer_like)
        .or_else(|| object.get("created_at").and_then(integer_like))
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

fn string_field(object: &Object, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn limit(object: &Object) -> Option<usize> {
    object
        .get("limit")
        .and_then(integer_like)
        .or_else(|| {
            object
                .get("config")
                .and_then(|config| config.get("limit"))
                .and_then(integer_like)
        })
        .and_then(|limit| usize::try_from(limit).ok())
}

fn request_context(object: &Object) -> RequestContext {
    RequestContext {
        user_id: simple(object, SIMPLE_USER),
        item_id: item_id(object),
        domain_id: domain_id(object),
        limit: limit(object),
    }
}

fn recommended_items(object: &Object) -> Vec<ItemId> {
    match object
        .get("recs")
        .and_then(|recs| recs.get("ints"))
        .and_then(|ints| ints.get(ITEM_SLOT))
    {
        Some(Value::Array(items)) => items.iter().filter_map(integer_like).collect(),
        Some(single) => integer_like(single).into_iter().collect(),
        None => Vec::new(),
    }
}
