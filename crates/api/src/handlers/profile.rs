use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub name: String,
    pub photo_path: String,
    /// Letter to render when the photo fails to load.
    pub fallback_initial: String,
}

/// GET /api/v1/profile
pub async fn get_profile(State(state): State<AppState>) -> Json<DataResponse<ProfileResponse>> {
    let profile = state.config.profile();
    let fallback_initial = profile.fallback_initial();
    Json(DataResponse {
        data: ProfileResponse {
            name: profile.name,
            photo_path: profile.photo_path,
            fallback_initial,
        },
    })
}
