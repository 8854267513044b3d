use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, RgbImage};

use crate::error::CoreError;

use super::{encoding, MAX_DIMENSION, OUTPUT_MIME, TARGET_MAX_BYTES};

/// Knobs for [`compress_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionOptions {
    /// Best-effort ceiling on the encoded size.
    pub max_bytes: usize,
    /// Ceiling on the longest side, in pixels.
    pub max_dimension: u32,
    /// First JPEG quality tried; its output is the resize-only baseline.
    pub initial_quality: u8,
    /// Lowest JPEG quality tried.
    pub min_quality: u8,
    pub quality_step: u8,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_bytes: TARGET_MAX_BYTES,
            max_dimension: MAX_DIMENSION,
            initial_quality: 90,
            min_quality: 10,
            quality_step: 10,
        }
    }
}

/// Output of a compression run.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub original_bytes: usize,
    /// `false` when even the lowest quality stayed above the byte budget.
    pub target_met: bool,
}

impl CompressedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime(&self) -> &'static str {
        OUTPUT_MIME
    }

    /// Inline representation stored in the item's `image` field.
    pub fn to_data_url(&self) -> String {
        encoding::to_data_url(OUTPUT_MIME, &self.bytes)
    }
}

/// Scale `(width, height)` down to fit a `max x max` box, keeping aspect ratio.
///
/// Never upscales and never returns a zero side.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max || longest == 0 {
        return (width, height);
    }
    let scale = f64::from(max) / f64::from(longest);
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}

/// Resize to fit `max_dimension`, then re-encode as JPEG at decreasing quality
/// until the output fits `max_bytes`.
///
/// If no quality reaches the budget, the smallest encoding produced is
/// returned with `target_met = false`; it is never larger than the first
/// (resize-only) attempt.
pub fn compress_image(raw: &[u8], options: &CompressionOptions) -> Result<CompressedImage, CoreError> {
    let decoded = image::load_from_memory(raw)
        .map_err(|e| CoreError::CompressionFailed(format!("Could not decode image: {e}")))?;

    let (src_w, src_h) = decoded.dimensions();
    let (width, height) = fit_within(src_w, src_h, options.max_dimension);
    let resized = if (width, height) == (src_w, src_h) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };
    let rgb = resized.to_rgb8();

    let min_quality = options.min_quality.clamp(1, 100);
    let step = options.quality_step.max(1);
    let mut quality = options.initial_quality.clamp(min_quality, 100);
    let mut best: Option<(Vec<u8>, u8)> = None;

    loop {
        let bytes = encode_jpeg(&rgb, quality)?;
        tracing::debug!(quality, size = bytes.len(), width, height, "Encoded JPEG attempt");

        if bytes.len() <= options.max_bytes {
            return Ok(CompressedImage {
                bytes,
                width,
                height,
                quality,
                original_bytes: raw.len(),
                target_met: true,
            });
        }

        let smaller = best
            .as_ref()
            .map_or(true, |(current, _)| bytes.len() < current.len());
        if smaller {
            best = Some((bytes, quality));
        }

        if quality <= min_quality {
            break;
        }
        quality = quality.saturating_sub(step).max(min_quality);
    }

    let (bytes, quality) = best.ok_or_else(|| {
        CoreError::CompressionFailed("No JPEG encoding was produced".into())
    })?;
    tracing::warn!(
        size = bytes.len(),
        budget = options.max_bytes,
        quality,
        "Image stays above the byte budget at the lowest quality"
    );

    Ok(CompressedImage {
        bytes,
        width,
        height,
        quality,
        original_bytes: raw.len(),
        target_met: false,
    })
}

fn encode_jpeg(rgb: &RgbImage, quality: u8) -> Result<Vec<u8>, CoreError> {
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(rgb)
        .map_err(|e| CoreError::CompressionFailed(format!("Could not encode JPEG: {e}")))?;
    Ok(out.into_inner())
}
