//! Integration tests for the Postgres-backed portfolio store.
//!
//! These need a reachable Postgres instance via `DATABASE_URL`; run them with
//! `cargo test -p porto-db -- --ignored`.

use assert_matches::assert_matches;
use porto_core::error::CoreError;
use porto_core::portfolio::{NewPortfolioItem, PortfolioItemPatch};
use porto_core::store::PortfolioStore;
use porto_db::repositories::PortfolioItemRepo;
use porto_db::PgPortfolioStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_item(title: &str) -> NewPortfolioItem {
    NewPortfolioItem {
        title: title.to_string(),
        category: "Web Application".to_string(),
        image: "data:image/jpeg;base64,AAAA".to_string(),
        technologies: vec!["React".to_string(), "Node".to_string()],
        description: "An online shop".to_string(),
        demo_link: "https://shop.example".to_string(),
        github_link: "#".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_create_then_find_round_trips(pool: PgPool) {
    let store = PgPortfolioStore::new(pool);
    let created = store.create(new_item("Shop App")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.created_at, created.updated_at);

    let found = store.find(created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.technologies, vec!["React", "Node"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_fresh_rows_share_one_timestamp(pool: PgPool) {
    let store = PgPortfolioStore::new(pool);
    for n in 0..200 {
        let created = store.create(new_item(&format!("Item {n}"))).await.unwrap();
        assert_eq!(created.created_at, created.updated_at, "row {}", created.id);
    }

    let rows = store.list().await.unwrap();
    assert_eq!(rows.len(), 200);
    assert!(rows.iter().all(|r| r.created_at == r.updated_at));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_list_is_newest_first(pool: PgPool) {
    let store = PgPortfolioStore::new(pool);
    let first = store.create(new_item("First")).await.unwrap();
    let second = store.create(new_item("Second")).await.unwrap();

    let ids: Vec<_> = store.list().await.unwrap().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_update_applies_patch_and_bumps_updated_at(pool: PgPool) {
    let store = PgPortfolioStore::new(pool);
    let created = store.create(new_item("Shop App")).await.unwrap();

    let patch = PortfolioItemPatch {
        title: Some("Shop App v2".to_string()),
        technologies: Some(vec![]),
        ..Default::default()
    };
    let updated = store.update(created.id, patch).await.unwrap();

    assert_eq!(updated.title, "Shop App v2");
    assert!(updated.technologies.is_empty());
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_update_missing_is_not_found(pool: PgPool) {
    let store = PgPortfolioStore::new(pool);
    let result = store.update(9_999, PortfolioItemPatch::default()).await;
    assert_matches!(result, Err(CoreError::NotFound { id: 9_999, .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_delete_is_idempotent(pool: PgPool) {
    let created = PortfolioItemRepo::create(&pool, &new_item("Temp"))
        .await
        .unwrap();
    assert!(PortfolioItemRepo::delete(&pool, created.id).await.unwrap());
    assert!(!PortfolioItemRepo::delete(&pool, created.id).await.unwrap());

    let store = PgPortfolioStore::new(pool);
    store.delete(created.id).await.unwrap();
    assert!(store.find(created.id).await.unwrap().is_none());
}
