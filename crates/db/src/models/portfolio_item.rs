//! Row model for the `portfolio_items` table.

use porto_core::portfolio::PortfolioItem;
use porto_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `portfolio_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioItemRow {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub description: String,
    pub demo_link: String,
    pub github_link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PortfolioItemRow> for PortfolioItem {
    fn from(row: PortfolioItemRow) -> Self {
        PortfolioItem {
            id: row.id,
            title: row.title,
            category: row.category,
            image: row.image,
            technologies: row.technologies,
            description: row.description,
            demo_link: row.demo_link,
            github_link: row.github_link,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
