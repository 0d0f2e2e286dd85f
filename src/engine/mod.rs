//! The `engine` module is the boundary between the message handler and the
//! recommendation logic.
//!
//! The router only talks to the [`Recommender`] trait. One engine instance is
//! shared by every in-flight request, so implementations must synchronize
//! internally; the router never locks around a call and treats every call as
//! potentially blocking.

mod history;
mod recent;

pub use history::DomainHistory;
pub use recent::RecentItemsEngine;

use crate::envelope::{ItemId, Message};
use crate::utils::error::EngineError;

/// Capabilities the router needs from a recommendation engine.
pub trait Recommender: Send + Sync {
    /// Records or refreshes content metadata from an `item_update`.
    fn update(&self, message: &Message) -> Result<(), EngineError>;

    /// Ranked item ids for a recommendation request. May be empty.
    fn recommend(&self, message: &Message) -> Result<Vec<ItemId>, EngineError>;

    /// Records that an item was shown to a user.
    fn impression(&self, message: &Message) -> Result<(), EngineError>;

    /// Records that a recommended item was clicked.
    fn click(&self, message: &Message) -> Result<(), EngineError>;
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
