//! Repository for the `portfolio_items` table.

use porto_core::portfolio::{NewPortfolioItem, PortfolioItemPatch};
use porto_core::types::DbId;
use sqlx::PgPool;

use crate::models::portfolio_item::PortfolioItemRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, category, image, technologies, description, \
                       demo_link, github_link, created_at, updated_at";

/// Provides CRUD operations for portfolio items.
pub struct PortfolioItemRepo;

impl PortfolioItemRepo {
    /// Insert a new item, returning the created row.
    ///
    /// Both timestamps default to `now()`, so a fresh row has
    /// `created_at == updated_at`.
    pub async fn create(
        pool: &PgPool,
        input: &NewPortfolioItem,
    ) -> Result<PortfolioItemRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO portfolio_items
                (title, category, image, technologies, description, demo_link, github_link)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioItemRow>(&query)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.image)
            .bind(&input.technologies)
            .bind(&input.description)
            .bind(&input.demo_link)
            .bind(&input.github_link)
            .fetch_one(pool)
            .await
    }

    /// Find an item by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PortfolioItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolio_items WHERE id = $1");
        sqlx::query_as::<_, PortfolioItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every item, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PortfolioItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolio_items
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PortfolioItemRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an item. Only non-`None` fields in `input` are applied.
    ///
    /// `updated_at` always moves forward, even when two writes land in the
    /// same clock tick. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PortfolioItemPatch,
    ) -> Result<Option<PortfolioItemRow>, sqlx::Error> {
        let query = format!(
            "UPDATE portfolio_items SET
                title = COALESCE($2, title),
                category = COALESCE($3, category),
                image = COALESCE($4, image),
                technologies = COALESCE($5, technologies),
                description = COALESCE($6, description),
                demo_link = COALESCE($7, demo_link),
                github_link = COALESCE($8, github_link),
                updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioItemRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.image)
            .bind(&input.technologies)
            .bind(&input.description)
            .bind(&input.demo_link)
            .bind(&input.github_link)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
