//! Portfolio item model, DTOs and save-time validation.
//!
//! A [`PortfolioItem`] is the only persisted entity. Creation goes through
//! [`NewPortfolioItem`] (no id, no timestamps) and edits through
//! [`PortfolioItemPatch`], where every `Some` field replaces the stored value
//! wholesale.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::image_intake::parse_data_url;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in `NotFound` errors.
pub const ENTITY_NAME: &str = "PortfolioItem";

/// Categories offered by the admin form. Stored values may be free text.
pub const PRESET_CATEGORIES: &[&str] = &[
    "Web Application",
    "Web Development",
    "Website",
    "Mobile App",
    "Web App",
];

/// Link placeholder that means "no link" for display purposes.
pub const LINK_PLACEHOLDER: &str = "#";

/// Technologies shown on a grid card before collapsing into "+N".
pub const GRID_TECHNOLOGY_PREVIEW: usize = 2;

/// Technologies shown on a list row before collapsing into "+N".
pub const LIST_TECHNOLOGY_PREVIEW: usize = 3;

// ---------------------------------------------------------------------------
// PortfolioItem
// ---------------------------------------------------------------------------

/// A stored portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: DbId,
    pub title: String,
    pub category: String,
    /// Inline data URL of the compressed image, or empty.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub demo_link: String,
    #[serde(default)]
    pub github_link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PortfolioItem {
    /// Demo link to render, if any.
    pub fn demo_url(&self) -> Option<&str> {
        display_link(&self.demo_link)
    }

    /// Source repository link to render, if any.
    pub fn github_url(&self) -> Option<&str> {
        display_link(&self.github_link)
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// Build a stored item from its creation payload.
    pub fn from_new(id: DbId, input: NewPortfolioItem, now: Timestamp) -> Self {
        Self {
            id,
            title: input.title,
            category: input.category,
            image: input.image,
            technologies: input.technologies,
            description: input.description,
            demo_link: input.demo_link,
            github_link: input.github_link,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Store ordering: newest `created_at` first, ties broken by higher id first.
pub fn newest_first(a: &PortfolioItem, b: &PortfolioItem) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort items into store order in place.
pub fn sort_newest_first(items: &mut [PortfolioItem]) {
    items.sort_by(newest_first);
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Payload for creating a new portfolio item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolioItem {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
    #[serde(default)]
    pub demo_link: String,
    #[serde(default)]
    pub github_link: String,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItemPatch {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub category: Option<String>,
    pub image: Option<String>,
    pub technologies: Option<Vec<String>>,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    pub demo_link: Option<String>,
    pub github_link: Option<String>,
}

impl PortfolioItemPatch {
    /// Apply every `Some` field onto `item`. Timestamps are left to the store.
    pub fn apply_to(&self, item: &mut PortfolioItem) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
        if let Some(image) = &self.image {
            item.image = image.clone();
        }
        if let Some(technologies) = &self.technologies {
            item.technologies = technologies.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(demo_link) = &self.demo_link {
            item.demo_link = demo_link.clone();
        }
        if let Some(github_link) = &self.github_link {
            item.github_link = github_link.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Collapse validator output into a single `CoreError::Validation`.
///
/// Field names are sorted so the message is stable.
fn into_core_error(errors: ValidationErrors) -> CoreError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    CoreError::Validation(format!("Required fields are missing: {}", fields.join(", ")))
}

/// Check that `title`, `category` and `description` are non-blank and that a
/// non-empty `image` is an inline image data URL.
pub fn validate_new_item(input: &NewPortfolioItem) -> Result<(), CoreError> {
    input.validate().map_err(into_core_error)?;
    validate_image(&input.image)
}

/// Check that any text field the patch sets is non-blank and that a set
/// `image` is empty or an inline image data URL.
pub fn validate_patch(patch: &PortfolioItemPatch) -> Result<(), CoreError> {
    patch.validate().map_err(into_core_error)?;
    match &patch.image {
        Some(image) => validate_image(image),
        None => Ok(()),
    }
}

/// Empty means "no image"; anything else must decode as a base64 image data URL.
fn validate_image(image: &str) -> Result<(), CoreError> {
    if image.is_empty() {
        return Ok(());
    }
    parse_data_url(image).map(|_| ())
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Normalise a stored link: empty or `#` means absent.
pub fn display_link(link: &str) -> Option<&str> {
    let trimmed = link.trim();
    if trimmed.is_empty() || trimmed == LINK_PLACEHOLDER {
        None
    } else {
        Some(trimmed)
    }
}

/// The leading tags of a technology list plus the number left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnologyPreview<'a> {
    pub shown: &'a [String],
    pub overflow: usize,
}

/// Take at most `limit` tags, keeping insertion order.
pub fn technology_preview(technologies: &[String], limit: usize) -> TechnologyPreview<'_> {
    let shown = &technologies[..technologies.len().min(limit)];
    TechnologyPreview {
        shown,
        overflow: technologies.len() - shown.len(),
    }
}

/// Append a tag typed by the user. Blank input is ignored; duplicates are kept.
///
/// Returns `true` if a tag was added.
pub fn push_technology(technologies: &mut Vec<String>, raw: &str) -> bool {
    let tag = raw.trim();
    if tag.is_empty() {
        return false;
    }
    technologies.push(tag.to_string());
    true
}

/// Remove the tag at `index`, if present.
pub fn remove_technology(technologies: &mut Vec<String>, index: usize) -> Option<String> {
    (index < technologies.len()).then(|| technologies.remove(index))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn valid_new() -> NewPortfolioItem {
        NewPortfolioItem {
            title: "Shop App".into(),
            category: "Web Application".into(),
            description: "E-commerce".into(),
            technologies: vec!["React".into(), "Laravel".into()],
            ..Default::default()
        }
    }

    fn stored(id: DbId, secs: i64) -> PortfolioItem {
        let at = Utc.timestamp_opt(secs, 0).single().unwrap();
        PortfolioItem::from_new(id, valid_new(), at)
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn valid_item_passes() {
        assert!(validate_new_item(&valid_new()).is_ok());
    }

    #[test]
    fn blank_required_fields_are_reported_sorted() {
        let input = NewPortfolioItem {
            title: "   ".into(),
            category: String::new(),
            description: "ok".into(),
            ..Default::default()
        };
        let err = validate_new_item(&input).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Required fields are missing: category, title");
    }

    #[test]
    fn optional_fields_may_be_empty() {
        let input = NewPortfolioItem {
            image: String::new(),
            demo_link: String::new(),
            technologies: vec![],
            ..valid_new()
        };
        assert!(validate_new_item(&input).is_ok());
    }

    #[test]
    fn image_must_be_an_inline_data_url() {
        let input = NewPortfolioItem {
            image: "definitely not an inline image".into(),
            ..valid_new()
        };
        assert_matches!(validate_new_item(&input), Err(CoreError::Validation(_)));

        let input = NewPortfolioItem {
            image: "data:text/plain;base64,aGk=".into(),
            ..valid_new()
        };
        assert_matches!(validate_new_item(&input), Err(CoreError::Validation(_)));

        let input = NewPortfolioItem {
            image: "data:image/jpeg;base64,AAAA".into(),
            ..valid_new()
        };
        assert!(validate_new_item(&input).is_ok());
    }

    #[test]
    fn patch_image_is_checked_only_when_set() {
        let bad = PortfolioItemPatch {
            image: Some("https://cdn.example/shot.png".into()),
            ..Default::default()
        };
        assert_matches!(validate_patch(&bad), Err(CoreError::Validation(_)));

        let cleared = PortfolioItemPatch {
            image: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_patch(&cleared).is_ok());
    }

    #[test]
    fn patch_rejects_blank_description() {
        let patch = PortfolioItemPatch {
            description: Some(" ".into()),
            ..Default::default()
        };
        assert_matches!(validate_patch(&patch), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_patch_is_valid() {
        let patch = PortfolioItemPatch::default();
        assert!(patch.is_empty());
        assert!(validate_patch(&patch).is_ok());
    }

    // -- patch application ---------------------------------------------------

    #[test]
    fn patch_replaces_technologies_wholesale() {
        let mut item = stored(1, 10);
        let patch = PortfolioItemPatch {
            technologies: Some(vec!["Rust".into()]),
            ..Default::default()
        };
        patch.apply_to(&mut item);
        assert_eq!(item.technologies, vec!["Rust".to_string()]);
        assert_eq!(item.title, "Shop App");
    }

    // -- ordering ------------------------------------------------------------

    #[test]
    fn sort_is_newest_first_with_id_tiebreak() {
        let mut items = vec![stored(1, 10), stored(2, 30), stored(3, 30)];
        sort_newest_first(&mut items);
        let ids: Vec<DbId> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    // -- links ---------------------------------------------------------------

    #[test]
    fn placeholder_and_empty_links_are_absent() {
        assert_eq!(display_link(""), None);
        assert_eq!(display_link("#"), None);
        assert_eq!(display_link(" # "), None);
        assert_eq!(display_link("https://x.test"), Some("https://x.test"));
    }

    // -- technologies --------------------------------------------------------

    #[test]
    fn push_technology_trims_and_keeps_duplicates() {
        let mut techs = vec!["React".to_string()];
        assert!(push_technology(&mut techs, "  React "));
        assert!(!push_technology(&mut techs, "   "));
        assert_eq!(techs, vec!["React".to_string(), "React".to_string()]);
    }

    #[test]
    fn remove_technology_out_of_range_is_none() {
        let mut techs = vec!["A".to_string(), "B".to_string()];
        assert_eq!(remove_technology(&mut techs, 5), None);
        assert_eq!(remove_technology(&mut techs, 0), Some("A".to_string()));
        assert_eq!(techs, vec!["B".to_string()]);
    }

    #[test]
    fn technology_preview_counts_overflow() {
        let techs: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let preview = technology_preview(&techs, GRID_TECHNOLOGY_PREVIEW);
        assert_eq!(preview.shown, &techs[..2]);
        assert_eq!(preview.overflow, 2);

        let short = technology_preview(&techs[..1], LIST_TECHNOLOGY_PREVIEW);
        assert_eq!(short.overflow, 0);
    }

    // -- serde ---------------------------------------------------------------

    #[test]
    fn wire_format_uses_camel_case() {
        let json = serde_json::to_value(stored(7, 10)).unwrap();
        assert!(json.get("demoLink").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("demo_link").is_none());
    }
}
