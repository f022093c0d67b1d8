use axum::extract::State;

use crate::api::state::AppState;
use crate::api::v1::dto::{HealthDto, LlmStatusDto};
use crate::api::v1::response::ApiResponse;
use crate::llm::ConversationBackend;

/// Service health and capability report.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthDto)
    )
)]
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthDto> {
    ApiResponse::success(HealthDto {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_entries: state.catalog.len(),
        llm: LlmStatusDto {
            available: state.llm.is_available(),
            model: state.llm.model().map(str::to_string),
        },
        speech_available: state.speech.is_available(),
    })
}
