use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::portfolio::{NewPortfolioItem, PortfolioItem, PortfolioItemPatch};
use crate::types::DbId;

use super::PortfolioStore;

/// Bounds every call on the wrapped store; expiry becomes `StoreUnavailable`.
#[derive(Debug, Clone)]
pub struct TimedStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: PortfolioStore> TimedStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, CoreError>> + Send,
    ) -> Result<T, CoreError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Store call timed out"
                );
                Err(CoreError::StoreUnavailable(format!(
                    "{operation} timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl<S: PortfolioStore> PortfolioStore for TimedStore<S> {
    async fn list(&self) -> Result<Vec<PortfolioItem>, CoreError> {
        self.bounded("list", self.inner.list()).await
    }

    async fn find(&self, id: DbId) -> Result<Option<PortfolioItem>, CoreError> {
        self.bounded("find", self.inner.find(id)).await
    }

    async fn create(&self, input: NewPortfolioItem) -> Result<PortfolioItem, CoreError> {
        self.bounded("create", self.inner.create(input)).await
    }

    async fn update(&self, id: DbId, patch: PortfolioItemPatch) -> Result<PortfolioItem, CoreError> {
        self.bounded("update", self.inner.update(id, patch)).await
    }

    async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.bounded("delete", self.inner.delete(id)).await
    }

    async fn ping(&self) -> Result<(), CoreError> {
        self.bounded("ping", self.inner.ping()).await
    }
}
