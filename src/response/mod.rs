//! Encoding of recommendation results into the contest wire format:
//!
//! ```text
//! {"recs":{"ints":{"3":[<item ids>]}}}
//! ```
//!
//! The `"3"` key is the slot the contest server reads item ids from and is
//! never parameterized.

use serde::Serialize;

use crate::envelope::ItemId;

/// Envelope returned when there is nothing to recommend.
pub const EMPTY_RECOMMENDATIONS: &str = r#"{"recs":{"ints":{"3":[]}}}"#;

#[derive(Serialize)]
struct RecsEnvelope<'a> {
    recs: Recs<'a>,
}

#[derive(Serialize)]
struct Recs<'a> {
    ints: Ints<'a>,
}

#[derive(Serialize)]
struct Ints<'a> {
    #[serde(rename = "3")]
    items: &'a [ItemId],
}

/// Encodes an ordered list of item ids.
pub fn encode_item_ids(ids: &[ItemId]) -> String {
    let envelope = RecsEnvelope {
        recs: Recs {
            ints: Ints { items: ids },
        },
    };
    serde_json::to_string(&envelope).unwrap_or_else(|_| EMPTY_RECOMMENDATIONS.to_string())
}

/// Encodes a textual id list such as `"1,2,3"` or `"[1, 2, 3]"`.
///
/// `None`, blank input and tokens that are not integers all fall away, so the
/// result is always a well-formed envelope.
pub fn encode_recommendations(ids: Option<&str>) -> String {
    let list = ids.map(str::trim).unwrap_or_default();
    let inner = match list.strip_prefix('[') {
        Some(rest) => rest.strip_suffix(']').unwrap_or(rest),
        None => list,
    };

    let ids: Vec<ItemId> = inner
        .split(',')
        .filter_map(|token| token.trim().parse().ok())
        .collect();
    encode_item_ids(&ids)
}
