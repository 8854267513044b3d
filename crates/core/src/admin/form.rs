use crate::error::CoreError;
use crate::image_intake::{ImageIntake, SelectedFile};
use crate::portfolio::{
    push_technology, remove_technology, validate_new_item, NewPortfolioItem, PortfolioItem,
    PortfolioItemPatch,
};
use crate::types::DbId;

/// The add/edit modal's fields.
///
/// Opening an edit copies the stored item in; submitting sends every field
/// back, so links, technologies and the image are replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct PortfolioForm {
    editing: Option<DbId>,
    pub title: String,
    pub category: String,
    pub description: String,
    pub demo_link: String,
    pub github_link: String,
    pub technologies: Vec<String>,
    /// Text box for the next technology tag.
    pub tech_input: String,
    pub image: ImageIntake,
}

impl PortfolioForm {
    /// Empty form for a new item.
    pub fn for_create() -> Self {
        Self::default()
    }

    /// Form pre-filled from a stored item.
    pub fn for_edit(item: &PortfolioItem) -> Self {
        Self {
            editing: Some(item.id),
            title: item.title.clone(),
            category: item.category.clone(),
            description: item.description.clone(),
            demo_link: item.demo_link.clone(),
            github_link: item.github_link.clone(),
            technologies: item.technologies.clone(),
            tech_input: String::new(),
            image: ImageIntake::new(item.image.clone()),
        }
    }

    pub fn editing_id(&self) -> Option<DbId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Move the typed tag into the technology list.
    pub fn add_technology(&mut self) -> bool {
        let added = push_technology(&mut self.technologies, &self.tech_input);
        if added {
            self.tech_input.clear();
        }
        added
    }

    pub fn remove_technology(&mut self, index: usize) -> Option<String> {
        remove_technology(&mut self.technologies, index)
    }

    pub fn select_image(&mut self, file: SelectedFile) -> Result<(), CoreError> {
        self.image.select(file)
    }

    /// Required text fields must be non-blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_new_item(&self.to_new_item(String::new()))
    }

    pub fn to_new_item(&self, image: String) -> NewPortfolioItem {
        NewPortfolioItem {
            title: self.title.clone(),
            category: self.category.clone(),
            image,
            technologies: self.technologies.clone(),
            description: self.description.clone(),
            demo_link: self.demo_link.clone(),
            github_link: self.github_link.clone(),
        }
    }

    pub fn to_patch(&self, image: String) -> PortfolioItemPatch {
        PortfolioItemPatch {
            title: Some(self.title.clone()),
            category: Some(self.category.clone()),
            image: Some(image),
            technologies: Some(self.technologies.clone()),
            description: Some(self.description.clone()),
            demo_link: Some(self.demo_link.clone()),
            github_link: Some(self.github_link.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    #[test]
    fn edit_form_copies_item() {
        let item = PortfolioItem::from_new(
            3,
            NewPortfolioItem {
                title: "Blog".into(),
                category: "Website".into(),
                description: "Personal blog".into(),
                technologies: vec!["Astro".into()],
                image: "data:image/jpeg;base64,AAAA".into(),
                github_link: "#".into(),
                ..Default::default()
            },
            Utc::now(),
        );
        let form = PortfolioForm::for_edit(&item);
        assert_eq!(form.editing_id(), Some(3));
        assert_eq!(form.technologies, vec!["Astro".to_string()]);
        assert_eq!(form.image.display_image(), "data:image/jpeg;base64,AAAA");
        assert_eq!(form.to_patch(item.image.clone()).github_link.as_deref(), Some("#"));
    }

    #[test]
    fn add_technology_clears_input_only_when_added() {
        let mut form = PortfolioForm::for_create();
        form.tech_input = "  Rust ".into();
        assert!(form.add_technology());
        assert_eq!(form.tech_input, "");

        form.tech_input = "   ".into();
        assert!(!form.add_technology());
        assert_eq!(form.tech_input, "   ");
        assert_eq!(form.technologies, vec!["Rust".to_string()]);
    }

    #[test]
    fn empty_form_fails_validation() {
        let form = PortfolioForm::for_create();
        assert_matches!(form.validate(), Err(CoreError::Validation(_)));
    }
}
