//! In-memory reference engine
//!
//! Keeps a bounded history of recent items per domain and a click counter per
//! item. Recommendations are the request domain's items, most clicked first,
//! newer items winning ties, with the item the user is reading left out.
//!
//! Concurrency notes:
//! - All state sits behind one `Mutex`; every trait method takes it for the
//!   duration of a short in-memory update and never across I/O.
//! - A poisoned lock is reported as `EngineError::Unavailable` instead of
//!   panicking the request thread.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::Recommender;
use super::history::DomainHistory;
use crate::config::EngineSettings;
use crate::envelope::{DomainId, ItemId, Message};
use crate::utils::error::EngineError;

#[derive(Debug, Default)]
struct EngineState {
    domains: HashMap<DomainId, DomainHistory>,
    clicks: HashMap<ItemId, u64>,
}

impl EngineState {
    fn record(&mut self, domain_id: DomainId, item: ItemId, capacity: usize) {
        self.domains
            .entry(domain_id)
            .or_insert_with(|| DomainHistory::new(domain_id, capacity))
            .record(item);
    }
}

#[derive(Debug)]
pub struct RecentItemsEngine {
    settings: EngineSettings,
    state: Mutex<EngineState>,
}

impl RecentItemsEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            state: Mutex::new(EngineState::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, EngineState>, EngineError> {
        self.state
            .lock()
            .map_err(|e| EngineError::Unavailable(e.to_string()))
    }

    /// Number of items currently remembered for `domain_id`.
    pub fn known_items(&self, domain_id: DomainId) -> usize {
        self.lock()
            .ok()
            .and_then(|state| state.domains.get(&domain_id).map(DomainHistory::len))
            .unwrap_or(0)
    }

    /// Clicks recorded for `item_id` so far.
    pub fn clicks(&self, item_id: ItemId) -> u64 {
        self.lock()
            .ok()
            .and_then(|state| state.clicks.get(&item_id).copied())
            .unwrap_or(0)
    }

    fn record_item(&self, message: &Message) -> Result<(), EngineError> {
        let item = message
            .item_id()
            .ok_or(EngineError::MissingField("item_id"))?;
        let domain = message
            .domain_id()
            .ok_or(EngineError::MissingField("domain_id"))?;

        self.lock()?
            .record(domain, item, self.settings.max_items_per_domain);
        Ok(())
    }
}

impl Default for RecentItemsEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl Recommender for RecentItemsEngine {
    fn update(&self, message: &Message) -> Result<(), EngineError> {
        self.record_item(message)
    }

    fn recommend(&self, message: &Message) -> Result<Vec<ItemId>, EngineError> {
        let context = message.request_context();
        let domain = context
            .and_then(|c| c.domain_id())
            .or(message.domain_id())
            .ok_or(EngineError::MissingField("domain_id"))?;
        let current = context.and_then(|c| c.item_id()).or(message.item_id());
        let limit = context
            .and_then(|c| c.limit())
            .unwrap_or(self.settings.default_limit);

        let state = self.lock()?;
        let Some(history) = state.domains.get(&domain) else {
            debug!(domain, "no items known for domain");
            return Ok(Vec::new());
        };

        let mut candidates: Vec<(usize, ItemId)> = history
            .iter()
            .filter(|&id| Some(id) != current)
            .enumerate()
            .collect();
        let clicks = |id: &ItemId| state.clicks.get(id).copied().unwrap_or(0);
        candidates.sort_by(|(a_rank, a), (b_rank, b)| {
            clicks(b).cmp(&clicks(a)).then(a_rank.cmp(b_rank))
        });

        Ok(candidates
            .into_iter()
            .take(limit)
            .map(|(_, id)| id)
            .collect())
    }

    fn impression(&self, message: &Message) -> Result<(), EngineError> {
        self.record_item(message)
    }

    fn click(&self, message: &Message) -> Result<(), EngineError> {
        let clicked: Vec<ItemId> = if message.recommended_items().is_empty() {
            message.item_id().into_iter().collect()
        } else {
            message.recommended_items().to_vec()
        };
        if clicked.is_empty() {
            return Err(EngineError::MissingField("item_id"));
        }

        let mut state = self.lock()?;
        for item in clicked {
            *state.clicks.entry(item).or_insert(0) += 1;
        }
        Ok(())
    }
}
