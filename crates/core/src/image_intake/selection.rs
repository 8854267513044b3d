use std::sync::Arc;

use crate::error::CoreError;

use super::MAX_UPLOAD_BYTES;

/// Raster formats accepted at selection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptedImageType {
    Jpeg,
    Png,
    Gif,
}

impl AcceptedImageType {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    /// Parse a MIME type, ignoring parameters and case.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Parse a file extension (`.jpeg`, `.jpg`, `.png`, `.gif`).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }
}

/// A file the user picked, as received from the browser or a multipart upload.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub file_name: String,
    /// Declared MIME type, if the client sent one.
    pub content_type: Option<String>,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn declared_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Run [`validate_selection`] against this file.
    pub fn validate(&self) -> Result<AcceptedImageType, CoreError> {
        validate_selection(
            &self.file_name,
            self.content_type.as_deref(),
            self.declared_size(),
        )
    }
}

/// Reject oversize files and anything that is not JPEG, PNG or GIF.
///
/// The declared MIME type wins when present; a missing or generic
/// (`application/octet-stream`) type falls back to the file extension.
pub fn validate_selection(
    file_name: &str,
    content_type: Option<&str>,
    declared_size: u64,
) -> Result<AcceptedImageType, CoreError> {
    if declared_size > MAX_UPLOAD_BYTES {
        return Err(CoreError::InvalidImage(format!(
            "'{file_name}' is {declared_size} bytes; the limit is {MAX_UPLOAD_BYTES} bytes"
        )));
    }

    let detected = match content_type {
        Some(mime) if !mime.is_empty() && !mime.starts_with("application/octet-stream") => {
            AcceptedImageType::from_mime(mime)
        }
        _ => AcceptedImageType::from_file_name(file_name),
    };

    detected.ok_or_else(|| {
        CoreError::InvalidImage(format!(
            "'{file_name}' is not a JPEG, PNG or GIF image"
        ))
    })
}
