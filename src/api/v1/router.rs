use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let sessions = Router::new()
        .route("/", post(handlers::chat::create_session))
        .route("/{sessionId}", get(handlers::chat::get_session))
        .route("/{sessionId}/messages", post(handlers::chat::send_message))
        .route("/{sessionId}/clear", post(handlers::chat::clear_session))
        .route("/{sessionId}/open", post(handlers::chat::open_session))
        .route("/{sessionId}/close", post(handlers::chat::close_session));

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .route("/faq", get(handlers::faq::list_faq))
        .route("/faq:match", post(handlers::faq::match_faq))
        .nest("/chat/sessions", sessions)
}
