use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Concierge API",
        version = "1.0.0",
        description = "FAQ-first support assistant with LLM fallback for the member portal.",
    ),
    paths(
        handlers::health::health,
        handlers::faq::list_faq,
        handlers::faq::match_faq,
        handlers::chat::create_session,
        handlers::chat::get_session,
        handlers::chat::send_message,
        handlers::chat::clear_session,
        handlers::chat::open_session,
        handlers::chat::close_session,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Domain models
        models::FaqEntry,
        models::ChatMessage,
        models::MessageRole,
        models::MessageSource,
        models::UserProfile,
        // FAQ
        dto::FaqMatchRequest,
        dto::FaqMatchDto,
        // Chat
        dto::CreateSessionRequest,
        dto::SessionDto,
        dto::SendMessageRequest,
        dto::SendMessageResponse,
        // Health
        dto::HealthDto,
        dto::LlmStatusDto,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "faq", description = "FAQ catalog listing and query scoring"),
        (name = "chat", description = "Chat sessions, transcripts, and message dispatch"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
