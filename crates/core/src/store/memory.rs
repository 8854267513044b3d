use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::portfolio::{
    sort_newest_first, NewPortfolioItem, PortfolioItem, PortfolioItemPatch, ENTITY_NAME,
};
use crate::types::{DbId, Timestamp};

use super::PortfolioStore;

/// In-process store used by tests and local development.
///
/// Timestamps are strictly increasing across writes, so an update always
/// moves `updated_at` forward even within one clock tick.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    offline: AtomicBool,
}

#[derive(Debug, Default)]
struct Inner {
    items: BTreeMap<DbId, PortfolioItem>,
    last_id: DbId,
    last_stamp: Option<Timestamp>,
}

impl Inner {
    fn next_stamp(&mut self) -> Timestamp {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + chrono::Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing the backing service: every call fails with
    /// `StoreUnavailable` until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_online(&self) -> Result<(), CoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CoreError::StoreUnavailable(
                "In-memory store is offline".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn list(&self) -> Result<Vec<PortfolioItem>, CoreError> {
        self.ensure_online()?;
        let mut items: Vec<PortfolioItem> = self.inner.read().await.items.values().cloned().collect();
        sort_newest_first(&mut items);
        Ok(items)
    }

    async fn find(&self, id: DbId) -> Result<Option<PortfolioItem>, CoreError> {
        self.ensure_online()?;
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn create(&self, input: NewPortfolioItem) -> Result<PortfolioItem, CoreError> {
        self.ensure_online()?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        let now = inner.next_stamp();
        let item = PortfolioItem::from_new(id, input, now);
        inner.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: DbId, patch: PortfolioItemPatch) -> Result<PortfolioItem, CoreError> {
        self.ensure_online()?;
        let mut inner = self.inner.write().await;
        let now = inner.next_stamp();
        let item = inner.items.get_mut(&id).ok_or(CoreError::NotFound {
            entity: ENTITY_NAME,
            id,
        })?;
        patch.apply_to(item);
        item.updated_at = now;
        Ok(item.clone())
    }

    async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.ensure_online()?;
        self.inner.write().await.items.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn shop_app() -> NewPortfolioItem {
        NewPortfolioItem {
            title: "Shop App".into(),
            category: "Web Application".into(),
            description: "E-commerce".into(),
            technologies: vec!["React".into(), "Laravel".into()],
            demo_link: "https://x.test".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_list_round_trips_fields() {
        let store = MemoryStore::new();
        let created = store.create(shop_app()).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        let item = &listed[0];
        assert_eq!(item.id, created.id);
        assert_eq!(item.title, "Shop App");
        assert_eq!(item.category, "Web Application");
        assert_eq!(item.description, "E-commerce");
        assert_eq!(item.technologies, vec!["React".to_string(), "Laravel".to_string()]);
        assert_eq!(item.demo_link, "https://x.test");
        assert_eq!(item.github_link, "");
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        let first = store.create(shop_app()).await.unwrap();
        let second = store.create(shop_app()).await.unwrap();
        let third = store.create(shop_app()).await.unwrap();

        let ids: Vec<DbId> = store.list().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_only() {
        let store = MemoryStore::new();
        let created = store.create(shop_app()).await.unwrap();

        let patch = PortfolioItemPatch {
            title: Some("Shop App v2".into()),
            ..Default::default()
        };
        store.update(created.id, patch).await.unwrap();

        let listed = store.list().await.unwrap();
        let item = &listed[0];
        assert_eq!(item.title, "Shop App v2");
        assert_eq!(item.id, created.id);
        assert_eq!(item.created_at, created.created_at);
        assert!(item.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = MemoryStore::new();
        assert_matches!(
            store.update(42, PortfolioItemPatch::default()).await,
            Err(CoreError::NotFound { id: 42, .. })
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let created = store.create(shop_app()).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert!(store.list().await.unwrap().iter().all(|i| i.id != created.id));
        store.delete(created.id).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn offline_store_is_unavailable() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert_matches!(store.list().await, Err(CoreError::StoreUnavailable(_)));
        assert_matches!(store.create(shop_app()).await, Err(CoreError::StoreUnavailable(_)));
        assert!(store.ping().await.is_err());

        store.set_offline(false);
        assert!(store.list().await.is_ok());
        assert!(store.ping().await.is_ok());
    }
}
