//! Document store contract for portfolio items.
//!
//! The store owns no business rules beyond ordering: `list` returns items
//! newest first. Validation happens before a call reaches the store.

mod memory;
mod timed;

pub use memory::MemoryStore;
pub use timed::TimedStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::portfolio::{NewPortfolioItem, PortfolioItem, PortfolioItemPatch};
use crate::types::DbId;

/// Default limit on a single store call.
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 15;

/// CRUD over the portfolio collection.
///
/// Every call is an independent request: no transactions, last writer wins.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// All items, `created_at` descending.
    async fn list(&self) -> Result<Vec<PortfolioItem>, CoreError>;

    /// Single item lookup.
    async fn find(&self, id: DbId) -> Result<Option<PortfolioItem>, CoreError>;

    /// Insert and return the stored item with its id and timestamps.
    async fn create(&self, input: NewPortfolioItem) -> Result<PortfolioItem, CoreError>;

    /// Apply `patch` and refresh `updated_at`. `NotFound` if `id` is missing.
    async fn update(&self, id: DbId, patch: PortfolioItemPatch) -> Result<PortfolioItem, CoreError>;

    /// Remove an item. Deleting a missing id succeeds.
    async fn delete(&self, id: DbId) -> Result<(), CoreError>;

    /// Cheap reachability check for health reporting.
    async fn ping(&self) -> Result<(), CoreError> {
        self.list().await.map(|_| ())
    }
}

#[async_trait]
impl<S: PortfolioStore + ?Sized> PortfolioStore for Arc<S> {
    async fn list(&self) -> Result<Vec<PortfolioItem>, CoreError> {
        (**self).list().await
    }

    async fn find(&self, id: DbId) -> Result<Option<PortfolioItem>, CoreError> {
        (**self).find(id).await
    }

    async fn create(&self, input: NewPortfolioItem) -> Result<PortfolioItem, CoreError> {
        (**self).create(input).await
    }

    async fn update(&self, id: DbId, patch: PortfolioItemPatch) -> Result<PortfolioItem, CoreError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        (**self).delete(id).await
    }

    async fn ping(&self) -> Result<(), CoreError> {
        (**self).ping().await
    }
}
