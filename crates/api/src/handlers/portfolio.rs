//! Handlers for the `/portfolio` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use porto_core::error::CoreError;
use porto_core::filter::{category_options, ItemDisplay};
use porto_core::portfolio::{
    validate_new_item, validate_patch, NewPortfolioItem, PortfolioItem, PortfolioItemPatch,
    ENTITY_NAME,
};
use porto_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::PortfolioListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Filtered listing with the counts and category choices the list view needs.
#[derive(Debug, Serialize)]
pub struct PortfolioListResponse {
    pub data: Vec<PortfolioItem>,
    /// Number of items after filtering.
    pub count: usize,
    /// `"all"` followed by every category in the unfiltered collection.
    pub categories: Vec<String>,
    /// Rendering hints for each entry of `data`, in the same order.
    pub display: Vec<ItemDisplay>,
}

/// GET /api/v1/portfolio?search=&category=&view=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PortfolioListParams>,
) -> AppResult<Json<PortfolioListResponse>> {
    let items = state.store.list().await?;
    let view = params.into_view();
    let data: Vec<PortfolioItem> = view.apply(&items).into_iter().cloned().collect();

    Ok(Json(PortfolioListResponse {
        count: data.len(),
        categories: category_options(&items),
        display: view.display(&data),
        data,
    }))
}

/// POST /api/v1/portfolio
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewPortfolioItem>,
) -> AppResult<(StatusCode, Json<DataResponse<PortfolioItem>>)> {
    validate_new_item(&input)?;
    let item = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/portfolio/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PortfolioItem>>> {
    let item = state
        .store
        .find(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_NAME,
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/portfolio/{id}
///
/// Fields left out of the body keep their stored value.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<PortfolioItemPatch>,
) -> AppResult<Json<DataResponse<PortfolioItem>>> {
    validate_patch(&patch)?;
    let item = state.store.update(id, patch).await?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/portfolio/{id}
///
/// Succeeds whether or not the item existed.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
