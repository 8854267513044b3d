//! Profile photograph descriptor with a textual fallback.

use serde::{Deserialize, Serialize};

/// Default path of the profile photograph within the static assets.
pub const DEFAULT_PHOTO_PATH: &str = "/profile.jpg";

/// Shown when the name has no usable character.
pub const UNKNOWN_INITIAL: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePhoto {
    pub name: String,
    pub photo_path: String,
}

impl ProfilePhoto {
    pub fn new(name: impl Into<String>, photo_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            photo_path: photo_path.into(),
        }
    }

    /// Letter rendered in place of the photo when it fails to load.
    pub fn fallback_initial(&self) -> String {
        self.name
            .chars()
            .find(|c| c.is_alphanumeric())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| UNKNOWN_INITIAL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_first_alphanumeric_uppercased() {
        assert_eq!(ProfilePhoto::new("rafi", DEFAULT_PHOTO_PATH).fallback_initial(), "R");
        assert_eq!(ProfilePhoto::new("  @dina", DEFAULT_PHOTO_PATH).fallback_initial(), "D");
    }

    #[test]
    fn blank_name_falls_back_to_placeholder() {
        assert_eq!(ProfilePhoto::new("", DEFAULT_PHOTO_PATH).fallback_initial(), "?");
        assert_eq!(ProfilePhoto::new(" - ", DEFAULT_PHOTO_PATH).fallback_initial(), "?");
    }
}
