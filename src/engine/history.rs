use std::collections::VecDeque;

use crate::envelope::{DomainId, ItemId};

/// Recently seen items of one domain, newest first.
///
/// An item appears at most once; recording it again moves it to the front.
/// The oldest items fall off once `capacity` is reached.
#[derive(Debug)]
pub struct DomainHistory {
    pub domain_id: DomainId,
    items: VecDeque<ItemId>,
    capacity: usize,
}

impl DomainHistory {
    pub fn new(domain_id: DomainId, capacity: usize) -> Self {
        Self {
            domain_id,
            items: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn record(&mut self, item: ItemId) {
        self.items.retain(|&id| id != item);
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }
}
