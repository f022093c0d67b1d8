use axum::extract::{Query, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::v1::dto::{FaqListParams, FaqMatchDto, FaqMatchRequest};
use crate::api::v1::response::{ApiResponse, ResponseMeta};
use crate::models::FaqEntry;

/// List catalog entries, optionally filtered by category.
#[utoipa::path(
    get,
    path = "/api/v1/faq",
    tag = "faq",
    params(FaqListParams),
    responses(
        (status = 200, description = "Catalog entries in catalog order", body = Vec<FaqEntry>)
    )
)]
pub async fn list_faq(
    State(state): State<AppState>,
    Query(params): Query<FaqListParams>,
) -> ApiResponse<Vec<FaqEntry>> {
    let entries: Vec<FaqEntry> = match &params.category {
        Some(category) => state
            .catalog
            .entries()
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect(),
        None => state.catalog.entries().to_vec(),
    };

    let total = entries.len() as u64;
    ApiResponse::success_with_meta(entries, ResponseMeta { total: Some(total) })
}

/// Score a query against the catalog without touching any transcript.
#[utoipa::path(
    post,
    path = "/api/v1/faq:match",
    tag = "faq",
    request_body = FaqMatchRequest,
    responses(
        (status = 200, description = "Best match, if any cleared the floor", body = FaqMatchDto)
    )
)]
pub async fn match_faq(
    State(state): State<AppState>,
    Json(body): Json<FaqMatchRequest>,
) -> ApiResponse<FaqMatchDto> {
    let hit = state.matcher.best_match(&body.query);
    ApiResponse::success(FaqMatchDto::from(hit))
}
