//! Route definitions for the `/images` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Body limit for uploads. Sits above the 5 MB selection limit so oversized
/// files reach the handler and get a descriptive `INVALID_IMAGE` error.
pub const UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Routes mounted at `/images`.
///
/// ```text
/// POST /preview   -> preview
/// POST /compress  -> compress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/preview", post(images::preview))
        .route("/compress", post(images::compress))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
