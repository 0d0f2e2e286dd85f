use chrono::{DateTime, Utc};

use crate::utils::error::PayloadError;

pub type ItemId = i64;
pub type DomainId = i64;
pub type UserId = i64;

/// Sub-type of an `event_notification`, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    Impression,
    Click,
    Other(String),
}

impl From<&str> for NotificationType {
    fn from(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("impression") {
            Self::Impression
        } else if raw.eq_ignore_ascii_case("click") {
            Self::Click
        } else {
            Self::Other(raw.to_string())
        }
    }
}

/// What the engine needs to answer a recommendation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub(crate) user_id: Option<UserId>,
    pub(crate) item_id: Option<ItemId>,
    pub(crate) domain_id: Option<DomainId>,
    pub(crate) limit: Option<usize>,
}

impl RequestContext {
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// The item the user is currently looking at.
    pub fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    pub fn domain_id(&self) -> Option<DomainId> {
        self.domain_id
    }

    /// Maximum number of items the contest server wants back.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Parsed payload of one contest-server envelope.
///
/// A `Message` is only built by the parsing functions in this module and is
/// read-only afterwards. Fields that were absent or unreadable in the payload
/// are `None`; nothing is defaulted to a sentinel value.
///
/// When the payload itself was empty or not a JSON object, every field is
/// unset and [`Message::parse_error`] says why.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub(crate) item_id: Option<ItemId>,
    pub(crate) domain_id: Option<DomainId>,
    pub(crate) notification_type: Option<NotificationType>,
    pub(crate) timestamp: Option<DateTime<Utc>>,
    pub(crate) title: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) request_context: Option<RequestContext>,
    pub(crate) recommended_items: Vec<ItemId>,
    pub(crate) parse_error: Option<PayloadError>,
}

impl Message {
    pub(crate) fn unparsed(reason: PayloadError) -> Self {
        Self {
            parse_error: Some(reason),
            ..Self::default()
        }
    }

    pub fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    pub fn domain_id(&self) -> Option<DomainId> {
        self.domain_id
    }

    pub fn notification_type(&self) -> Option<&NotificationType> {
        self.notification_type.as_ref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn request_context(&self) -> Option<&RequestContext> {
        self.request_context.as_ref()
    }

    /// Item ids listed in the event's `recs` block. For a click this is the
    /// recommendation the user followed.
    pub fn recommended_items(&self) -> &[ItemId] {
        &self.recommended_items
    }

    pub fn parse_error(&self) -> Option<&PayloadError> {
        self.parse_error.as_ref()
    }
}
