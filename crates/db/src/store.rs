//! [`PortfolioStore`] backed by Postgres.

use async_trait::async_trait;
use porto_core::error::CoreError;
use porto_core::portfolio::{self, NewPortfolioItem, PortfolioItem, PortfolioItemPatch};
use porto_core::store::PortfolioStore;
use porto_core::types::DbId;

use crate::repositories::PortfolioItemRepo;
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgPortfolioStore {
    pool: DbPool,
}

impl PgPortfolioStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PortfolioStore for PgPortfolioStore {
    async fn list(&self) -> Result<Vec<PortfolioItem>, CoreError> {
        let rows = PortfolioItemRepo::list(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;
        Ok(rows.into_iter().map(PortfolioItem::from).collect())
    }

    async fn find(&self, id: DbId) -> Result<Option<PortfolioItem>, CoreError> {
        let row = PortfolioItemRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| map_sqlx_error("find", e))?;
        Ok(row.map(PortfolioItem::from))
    }

    async fn create(&self, input: NewPortfolioItem) -> Result<PortfolioItem, CoreError> {
        let row = PortfolioItemRepo::create(&self.pool, &input)
            .await
            .map_err(|e| map_sqlx_error("create", e))?;
        tracing::info!(id = row.id, title = %row.title, "Portfolio item created");
        Ok(row.into())
    }

    async fn update(&self, id: DbId, patch: PortfolioItemPatch) -> Result<PortfolioItem, CoreError> {
        let row = PortfolioItemRepo::update(&self.pool, id, &patch)
            .await
            .map_err(|e| map_sqlx_error("update", e))?
            .ok_or(CoreError::NotFound {
                entity: portfolio::ENTITY_NAME,
                id,
            })?;
        tracing::info!(id, "Portfolio item updated");
        Ok(row.into())
    }

    async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        let removed = PortfolioItemRepo::delete(&self.pool, id)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        tracing::info!(id, removed, "Portfolio item deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ping", e))
    }
}

/// Connection-level failures become `StoreUnavailable`; anything else is a
/// bug or schema mismatch and surfaces as `Internal`.
fn map_sqlx_error(op: &str, err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            tracing::warn!(op, error = %err, "Portfolio store unreachable");
            CoreError::StoreUnavailable(format!("{op} failed: {err}"))
        }
        other => {
            tracing::error!(op, error = %other, "Portfolio store query failed");
            CoreError::Internal(format!("{op} failed: {other}"))
        }
    }
}
