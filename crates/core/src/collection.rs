//! Client-side copy of the portfolio collection.
//!
//! After a successful mutation the known result is patched in locally
//! instead of re-fetching the whole list; the resulting order is the one
//! `PortfolioStore::list` would return.

use crate::portfolio::{newest_first, sort_newest_first, PortfolioItem};
use crate::types::DbId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCollection {
    items: Vec<PortfolioItem>,
}

impl ItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with a fresh listing.
    pub fn replace_all(&mut self, mut items: Vec<PortfolioItem>) {
        sort_newest_first(&mut items);
        self.items = items;
    }

    pub fn items(&self) -> &[PortfolioItem] {
        &self.items
    }

    pub fn get(&self, id: DbId) -> Option<&PortfolioItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert a freshly created item at its sorted position.
    pub fn insert_created(&mut self, item: PortfolioItem) {
        let at = self
            .items
            .partition_point(|existing| newest_first(existing, &item).is_lt());
        self.items.insert(at, item);
    }

    /// Replace an updated item in place (its `created_at` is unchanged, so is
    /// its position). Unknown ids are inserted.
    pub fn apply_updated(&mut self, item: PortfolioItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.insert_created(item),
        }
    }

    /// Remove an item; absent ids are ignored.
    pub fn remove(&mut self, id: DbId) -> Option<PortfolioItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}
