//! Handlers for the `/images` resource.
//!
//! Both endpoints take a multipart form with a single `file` field and run
//! the same selection checks as the admin form before touching the bytes.

use axum::extract::{Multipart, State};
use axum::Json;
use porto_core::image_intake::{
    compress_blocking, preview_blocking, CompressionOptions, SelectedFile,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub file_name: String,
    pub size_bytes: u64,
    pub data_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressResponse {
    pub data_url: String,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub original_bytes: usize,
    pub output_bytes: usize,
    pub target_met: bool,
}

/// POST /api/v1/images/preview
///
/// Returns the upload unchanged as a data URL.
pub async fn preview(multipart: Multipart) -> AppResult<Json<DataResponse<PreviewResponse>>> {
    let file = read_file_field(multipart).await?;
    let file_name = file.file_name.clone();
    let size_bytes = file.declared_size();
    let data_url = preview_blocking(file).await?;

    Ok(Json(DataResponse {
        data: PreviewResponse {
            file_name,
            size_bytes,
            data_url,
        },
    }))
}

/// POST /api/v1/images/compress
///
/// Resizes and re-encodes the upload as JPEG under the byte target.
pub async fn compress(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<CompressResponse>>> {
    let file = read_file_field(multipart).await?;
    file.validate()?;

    let compressed = compress_blocking(
        file.bytes,
        CompressionOptions::default(),
        state.config.compression_timeout(),
    )
    .await?;

    tracing::info!(
        file_name = %file.file_name,
        original_bytes = compressed.original_bytes,
        output_bytes = compressed.len(),
        quality = compressed.quality,
        target_met = compressed.target_met,
        "Image compressed",
    );

    Ok(Json(DataResponse {
        data: CompressResponse {
            data_url: compressed.to_data_url(),
            mime: compressed.mime(),
            width: compressed.width,
            height: compressed.height,
            quality: compressed.quality,
            original_bytes: compressed.original_bytes,
            output_bytes: compressed.len(),
            target_met: compressed.target_met,
        },
    }))
}

/// Pull the `file` field out of the form; other fields are ignored.
async fn read_file_field(mut multipart: Multipart) -> AppResult<SelectedFile> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        return Ok(SelectedFile::new(file_name, content_type, data.to_vec()));
    }

    Err(AppError::BadRequest(format!(
        "Missing required '{FILE_FIELD}' field"
    )))
}
