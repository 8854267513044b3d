//! One-time UI hints persisted as namespaced boolean flags.
//!
//! Flags live in a small JSON file keyed `"<feature>.<flag>"`. An absent key
//! means the hint has not been seen yet; marking it seen writes `true` and it
//! never shows again.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Feature namespace of the navigation hint.
pub const NAVIGATION_FEATURE: &str = "navigation";

/// Flag recording that the navigation tooltip was shown.
pub const NAVIGATION_TOOLTIP_SEEN: &str = "has_seen_tooltip";

#[derive(Debug, Clone)]
pub struct HintFlags {
    path: PathBuf,
    flags: BTreeMap<String, bool>,
}

impl HintFlags {
    /// Load flags from `path`; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let flags = match std::fs::read(&path) {
            Ok(raw) => serde_json::from_slice(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable hint flags, starting fresh");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(CoreError::Internal(format!(
                    "Failed to read hint flags at {}: {e}",
                    path.display()
                )))
            }
        };
        Ok(Self { path, flags })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the hint `feature.flag` should still be shown.
    pub fn should_show(&self, feature: &str, flag: &str) -> bool {
        !self.flags.get(&key(feature, flag)).copied().unwrap_or(false)
    }

    /// Record the hint as seen and persist immediately.
    pub fn mark_seen(&mut self, feature: &str, flag: &str) -> Result<(), CoreError> {
        self.flags.insert(key(feature, flag), true);
        self.save()
    }

    pub fn should_show_navigation_hint(&self) -> bool {
        self.should_show(NAVIGATION_FEATURE, NAVIGATION_TOOLTIP_SEEN)
    }

    pub fn mark_navigation_hint_seen(&mut self) -> Result<(), CoreError> {
        self.mark_seen(NAVIGATION_FEATURE, NAVIGATION_TOOLTIP_SEEN)
    }

    fn save(&self) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::Internal(format!("Failed to create {}: {e}", parent.display())))?;
        }
        let raw = serde_json::to_vec_pretty(&self.flags)
            .map_err(|e| CoreError::Internal(format!("Failed to serialize hint flags: {e}")))?;
        std::fs::write(&self.path, raw).map_err(|e| {
            CoreError::Internal(format!("Failed to write hint flags to {}: {e}", self.path.display()))
        })
    }
}

fn key(feature: &str, flag: &str) -> String {
    format!("{feature}.{flag}")
}
