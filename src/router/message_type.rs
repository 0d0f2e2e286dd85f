/// Message-type discriminator sent in the envelope's `type` parameter.
///
/// Matching is case-insensitive; anything unrecognized lands in `Unknown`
/// with the original spelling kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    ItemUpdate,
    RecommendationRequest,
    EventNotification,
    ErrorNotification,
    Unknown(String),
}

impl From<&str> for MessageType {
    fn from(raw: &str) -> Self {
        const KNOWN: [(&str, MessageType); 4] = [
            ("item_update", MessageType::ItemUpdate),
            ("recommendation_request", MessageType::RecommendationRequest),
            ("event_notification", MessageType::EventNotification),
            ("error_notification", MessageType::ErrorNotification),
        ];

        KNOWN
            .into_iter()
            .find(|(name, _)| raw.eq_ignore_ascii_case(name))
            .map(|(_, kind)| kind)
            .unwrap_or_else(|| Self::Unknown(raw.to_string()))
    }
}
