//! Shared query parameter types for API handlers.

use porto_core::filter::{CategoryFilter, ViewMode, ViewState};
use serde::Deserialize;

/// Query parameters for `GET /portfolio` (`?search=&category=&view=`).
///
/// A missing or `all` category matches every item. `view` is `grid` (default)
/// or `list` and only changes the rendering hints.
#[derive(Debug, Default, Deserialize)]
pub struct PortfolioListParams {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub view: ViewMode,
}

impl PortfolioListParams {
    pub fn into_view(self) -> ViewState {
        let category = self
            .category
            .map(CategoryFilter::from)
            .unwrap_or(CategoryFilter::All);
        ViewState {
            view_mode: self.view,
            ..ViewState::default()
        }
        .with_search(self.search)
        .with_category(category)
    }
}
