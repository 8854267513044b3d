use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::error::CoreError;

use super::compress::{compress_image, CompressedImage, CompressionOptions};
use super::encoding::to_data_url;
use super::selection::SelectedFile;
use super::DEFAULT_COMPRESSION_TIMEOUT_SECS;

/// Where a single upload attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeState {
    Idle,
    FileSelected,
    PreviewReady,
    Compressing,
    Encoded,
}

/// Per-form image state: the persisted image plus any new selection.
///
/// The value to store on submit comes from [`ImageIntake::finalize`]: the
/// compressed new selection when there is one, otherwise the persisted image
/// unchanged.
#[derive(Debug, Clone)]
pub struct ImageIntake {
    state: IntakeState,
    persisted: String,
    selected: Option<SelectedFile>,
    preview: Option<String>,
    encoded: Option<String>,
    options: CompressionOptions,
    timeout: Duration,
}

impl Default for ImageIntake {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl ImageIntake {
    /// Start an intake for a form whose stored image is `persisted` (empty on create).
    pub fn new(persisted: impl Into<String>) -> Self {
        Self {
            state: IntakeState::Idle,
            persisted: persisted.into(),
            selected: None,
            preview: None,
            encoded: None,
            options: CompressionOptions::default(),
            timeout: Duration::from_secs(DEFAULT_COMPRESSION_TIMEOUT_SECS),
        }
    }

    pub fn with_compression(mut self, options: CompressionOptions, timeout: Duration) -> Self {
        self.options = options;
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn has_new_file(&self) -> bool {
        self.selected.is_some()
    }

    /// Image to show in the form: the fresh preview, else the persisted image.
    pub fn display_image(&self) -> &str {
        self.preview.as_deref().unwrap_or(&self.persisted)
    }

    /// Accept a new file after size/type checks.
    ///
    /// On rejection the previous selection (if any) is left untouched.
    pub fn select(&mut self, file: SelectedFile) -> Result<(), CoreError> {
        let accepted = file.validate()?;
        tracing::debug!(
            file_name = %file.file_name,
            size = file.declared_size(),
            mime = accepted.mime(),
            "Image selected"
        );
        self.selected = Some(file);
        self.preview = None;
        self.encoded = None;
        self.state = IntakeState::FileSelected;
        Ok(())
    }

    /// Build the uncompressed preview for the current selection.
    pub async fn load_preview(&mut self) -> Result<&str, CoreError> {
        let file = self
            .selected
            .clone()
            .ok_or_else(|| CoreError::Validation("No image selected".into()))?;

        let preview = preview_blocking(file).await?;
        self.state = IntakeState::PreviewReady;
        Ok(self.preview.insert(preview).as_str())
    }

    /// Drop the selection and preview; the persisted image shows again.
    pub fn clear(&mut self) {
        self.selected = None;
        self.preview = None;
        self.encoded = None;
        self.state = IntakeState::Idle;
    }

    /// Produce the value for the item's `image` field.
    ///
    /// A new selection is compressed (at most once per selection); without
    /// one the persisted image passes through. On failure the selection stays
    /// so the caller can retry or clear it.
    pub async fn finalize(&mut self) -> Result<String, CoreError> {
        let Some(file) = self.selected.clone() else {
            return Ok(self.persisted.clone());
        };
        if let Some(encoded) = &self.encoded {
            return Ok(encoded.clone());
        }

        let previous = self.state;
        self.state = IntakeState::Compressing;

        match compress_blocking(file.bytes, self.options.clone(), self.timeout).await {
            Ok(compressed) => {
                tracing::info!(
                    file_name = %file.file_name,
                    original = compressed.original_bytes,
                    compressed = compressed.len(),
                    quality = compressed.quality,
                    target_met = compressed.target_met,
                    "Image compressed"
                );
                let data_url = compressed.to_data_url();
                self.encoded = Some(data_url.clone());
                self.state = IntakeState::Encoded;
                Ok(data_url)
            }
            Err(err) => {
                tracing::warn!(file_name = %file.file_name, error = %err, "Image compression failed");
                self.state = previous;
                Err(err)
            }
        }
    }
}

/// Encode the raw selection as a data URL off the async executor.
pub async fn preview_blocking(file: SelectedFile) -> Result<String, CoreError> {
    let accepted = file.validate()?;
    tokio::task::spawn_blocking(move || to_data_url(accepted.mime(), &file.bytes))
        .await
        .map_err(|e| CoreError::Internal(format!("Preview task failed: {e}")))
}

/// Run [`compress_image`] on the blocking pool, bounded by `timeout`.
///
/// Expiry and task failures surface as `CompressionFailed`.
pub async fn compress_blocking(
    bytes: Arc<[u8]>,
    options: CompressionOptions,
    timeout: Duration,
) -> Result<CompressedImage, CoreError> {
    let task = tokio::task::spawn_blocking(move || compress_image(&bytes, &options));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(CoreError::CompressionFailed(format!(
            "Compression task failed: {join_err}"
        ))),
        Err(_) => Err(CoreError::CompressionFailed(format!(
            "Compression timed out after {}s",
            timeout.as_secs_f64()
        ))),
    }
}
