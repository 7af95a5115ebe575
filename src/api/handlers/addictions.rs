//! Handlers for the addiction catalog and content endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::debug;

use crate::api::dto::ApiResponse;
use crate::api::dto::addiction::{
    AddictionDetail, AddictionSummary, AddictionTypesResponse, ContentView, SearchResponse,
};
use crate::application::services::ContentLookup;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::identifier::normalize_identifier;

/// Lists every addiction type grouped by category.
///
/// # Endpoint
///
/// `GET /api/addictions/types`
pub async fn types_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<AddictionTypesResponse>> {
    Json(ApiResponse::success(AddictionTypesResponse::from(
        state.catalog.as_ref(),
    )))
}

/// Returns one addiction type with its guide content.
///
/// # Endpoint
///
/// `GET /api/addictions/{addiction_id}`
///
/// The id is lowercased and stripped of everything outside `[a-z0-9]` before
/// lookup, so `/api/addictions/Social-Media` resolves `socialmedia`.
///
/// # Errors
///
/// - **400** if the id is empty
/// - **404** `Addiction type not found` if the id is not in the catalog
/// - **404** `Addiction content not found` if its content is missing or unreadable
pub async fn addiction_handler(
    Path(addiction_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AddictionDetail>>, AppError> {
    if addiction_id.is_empty() {
        return Err(AppError::bad_request("Addiction ID is required"));
    }

    let id = normalize_identifier(&addiction_id);

    let entry = state
        .catalog
        .find(&id)
        .ok_or_else(|| AppError::not_found("Addiction type not found"))?;

    let record = match state.content.load(&id).await {
        ContentLookup::Found(record) => record,
        ContentLookup::Absent => {
            debug!(%id, "Catalog entry has no content");
            return Err(AppError::not_found("Addiction content not found"));
        }
    };

    Ok(Json(ApiResponse::success(AddictionDetail {
        summary: AddictionSummary::from(entry),
        content: ContentView::from(record.as_ref()),
    })))
}

/// Searches catalog names and ids.
///
/// # Endpoint
///
/// `GET /api/addictions/search/{query}`
///
/// # Errors
///
/// - **400** if the trimmed query is shorter than two characters
pub async fn search_handler(
    Path(query): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SearchResponse>, AppError> {
    let results = state.catalog.search(&query)?;
    let data: Vec<AddictionSummary> = results
        .matches
        .into_iter()
        .map(AddictionSummary::from)
        .collect();

    Ok(Json(SearchResponse {
        status: "success",
        total_results: data.len(),
        data,
        query: results.term,
    }))
}
