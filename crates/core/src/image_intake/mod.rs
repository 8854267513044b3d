//! Image intake pipeline: selection checks, uncompressed preview, compression
//! to a size/dimension budget, and inline (data URL) encoding.
//!
//! Per upload attempt the [`ImageIntake`] state machine moves through
//! `Idle -> FileSelected -> PreviewReady -> Compressing -> Encoded`, and can be
//! cleared back to `Idle` at any point before submit.

mod compress;
mod encoding;
mod intake;
mod selection;

pub use compress::{compress_image, fit_within, CompressedImage, CompressionOptions};
pub use encoding::{parse_data_url, to_data_url, DataUrl};
pub use intake::{compress_blocking, preview_blocking, ImageIntake, IntakeState};
pub use selection::{validate_selection, AcceptedImageType, SelectedFile};

/// Hard cap on the declared size of a selected file (5 MB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Best-effort byte budget for the stored image (100 KB).
pub const TARGET_MAX_BYTES: usize = 100 * 1024;

/// Longest side of the stored image, in pixels.
pub const MAX_DIMENSION: u32 = 800;

/// MIME type of every compressed image.
pub const OUTPUT_MIME: &str = "image/jpeg";

/// Default limit on a single compression run.
pub const DEFAULT_COMPRESSION_TIMEOUT_SECS: u64 = 30;
