//! List/filter view over the in-memory item collection.
//!
//! The view is a pure function of `(items, ViewState)`. [`ViewState`] is an
//! explicit serialisable value (search text, selected category, layout) that
//! callers thread through and change; nothing here holds hidden state.

use serde::{Deserialize, Serialize};

use crate::portfolio::{technology_preview, PortfolioItem};
use crate::types::DbId;

/// Wire value of the "match every category" sentinel.
pub const ALL_CATEGORIES: &str = "all";

// ---------------------------------------------------------------------------
// Category filter
// ---------------------------------------------------------------------------

/// Category selection: every item, or one exact category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(wanted) => wanted == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Exact(category) => category,
        }
    }
}

impl From<String> for CategoryFilter {
    /// `"all"` and the empty string select every category.
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Exact(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Exact(category) => category,
        }
    }
}

// ---------------------------------------------------------------------------
// View mode
// ---------------------------------------------------------------------------

/// Admin list layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// How many technology tags a card or row shows before "+N".
    pub fn technology_preview_limit(self) -> usize {
        match self {
            Self::Grid => crate::portfolio::GRID_TECHNOLOGY_PREVIEW,
            Self::List => crate::portfolio::LIST_TECHNOLOGY_PREVIEW,
        }
    }
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Everything the filtered view depends on besides the items themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    pub search: String,
    pub category: CategoryFilter,
    pub view_mode: ViewMode,
}

impl ViewState {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Whether `item` passes both the category and the search filter.
    pub fn matches(&self, item: &PortfolioItem) -> bool {
        self.category.matches(&item.category) && matches_search(item, &self.search)
    }

    /// Items passing both filters, in their original order.
    pub fn apply<'a>(&self, items: &'a [PortfolioItem]) -> Vec<&'a PortfolioItem> {
        let needle = self.search.to_lowercase();
        items
            .iter()
            .filter(|item| self.category.matches(&item.category))
            .filter(|item| matches_lowercase_needle(item, &needle))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Rendering hints
// ---------------------------------------------------------------------------

/// What a card or row renders for one item besides its text fields.
///
/// Links are `None` when the stored value is empty or `#`; `technologies`
/// is truncated to the layout's preview size and `more_technologies` is the
/// "+N" count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDisplay {
    pub id: DbId,
    pub has_image: bool,
    pub technologies: Vec<String>,
    pub more_technologies: usize,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
}

impl ItemDisplay {
    pub fn new(item: &PortfolioItem, mode: ViewMode) -> Self {
        let preview = technology_preview(&item.technologies, mode.technology_preview_limit());
        Self {
            id: item.id,
            has_image: item.has_image(),
            technologies: preview.shown.to_vec(),
            more_technologies: preview.overflow,
            demo_url: item.demo_url().map(str::to_string),
            github_url: item.github_url().map(str::to_string),
        }
    }
}

impl ViewState {
    /// Rendering hints for `items` under the current layout.
    pub fn display<'a>(
        &self,
        items: impl IntoIterator<Item = &'a PortfolioItem>,
    ) -> Vec<ItemDisplay> {
        items
            .into_iter()
            .map(|item| ItemDisplay::new(item, self.view_mode))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Case-insensitive substring match on title, description or any technology.
///
/// An empty search matches every item.
pub fn matches_search(item: &PortfolioItem, search: &str) -> bool {
    matches_lowercase_needle(item, &search.to_lowercase())
}

fn matches_lowercase_needle(item: &PortfolioItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item
            .technologies
            .iter()
            .any(|tech| tech.to_lowercase().contains(needle))
}

/// Category chips: `"all"` first, then each distinct category in first-seen order.
pub fn category_options(items: &[PortfolioItem]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !options[1..].contains(&item.category) {
            options.push(item.category.clone());
        }
    }
    options
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
