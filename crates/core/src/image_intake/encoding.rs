use base64::Engine as _;

use crate::error::CoreError;

/// A decoded `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encode raw bytes as a base64 data URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

/// Decode a base64 data URL whose MIME type is an image.
pub fn parse_data_url(value: &str) -> Result<DataUrl, CoreError> {
    let rest = value
        .strip_prefix("data:")
        .ok_or_else(|| CoreError::Validation("Image must be a data URL".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CoreError::Validation("Image data URL has no payload".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| CoreError::Validation("Image data URL must be base64 encoded".into()))?;
    if !mime.starts_with("image/") {
        return Err(CoreError::Validation(format!(
            "Image data URL has non-image type '{mime}'"
        )));
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| CoreError::Validation(format!("Image data URL is not valid base64: {e}")))?;

    Ok(DataUrl {
        mime: mime.to_string(),
        bytes,
    })
}
