pub mod health;
pub mod images;
pub mod portfolio;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /portfolio                 list (?search=&category=), create
/// /portfolio/{id}            get, update, delete
///
/// /images/preview            raw upload -> data URL (POST, multipart)
/// /images/compress           upload -> compressed JPEG data URL (POST, multipart)
///
/// /profile                   profile card with fallback initial
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/portfolio", portfolio::router())
        .nest("/images", images::router())
        .route("/profile", get(handlers::profile::get_profile))
}
