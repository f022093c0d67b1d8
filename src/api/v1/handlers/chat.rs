use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::v1::dto::{
    CreateSessionRequest, SendMessageRequest, SendMessageResponse, SessionDto,
};
use crate::api::v1::response::ApiResponse;
use crate::chat::ChatDispatcher;
use crate::error::ConciergeError;

use std::sync::Arc;

fn lookup(state: &AppState, session_id: &str) -> Result<Arc<ChatDispatcher>, ConciergeError> {
    state
        .sessions
        .get(session_id)
        .ok_or_else(|| ConciergeError::NotFound(format!("Session not found: {session_id}")))
}

/// Create a chat session seeded with the greeting.
#[utoipa::path(
    post,
    path = "/api/v1/chat/sessions",
    tag = "chat",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = SessionDto)
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequest>,
) -> ApiResponse<SessionDto> {
    let profile = body.client_profile;
    let (id, dispatcher) = state.sessions.create(state.new_dispatcher(profile));
    tracing::info!(session_id = %id, "Chat session created");
    ApiResponse::created(SessionDto::from_dispatcher(id, &dispatcher))
}

/// Fetch a session snapshot including its full transcript.
#[utoipa::path(
    get,
    path = "/api/v1/chat/sessions/{sessionId}",
    tag = "chat",
    params(("sessionId" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session snapshot", body = SessionDto),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<SessionDto> {
    match lookup(&state, &session_id) {
        Ok(dispatcher) => {
            ApiResponse::success(SessionDto::from_dispatcher(session_id, &dispatcher))
        }
        Err(err) => err.into(),
    }
}

/// Submit a user message and wait for the assistant reply.
#[utoipa::path(
    post,
    path = "/api/v1/chat/sessions/{sessionId}/messages",
    tag = "chat",
    params(("sessionId" = String, Path, description = "Session identifier")),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Assistant reply", body = SendMessageResponse),
        (status = 400, description = "Empty message"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "A reply is already in flight")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> ApiResponse<SendMessageResponse> {
    let dispatcher = match lookup(&state, &session_id) {
        Ok(dispatcher) => dispatcher,
        Err(err) => return err.into(),
    };

    match dispatcher.submit(&body.content).await {
        Ok(reply) => ApiResponse::success(SendMessageResponse { session_id, reply }),
        Err(err) => err.into(),
    }
}

/// Reset the transcript to a single fresh greeting.
#[utoipa::path(
    post,
    path = "/api/v1/chat/sessions/{sessionId}/clear",
    tag = "chat",
    params(("sessionId" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Transcript reset", body = SessionDto),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<SessionDto> {
    match lookup(&state, &session_id) {
        Ok(dispatcher) => {
            dispatcher.clear();
            ApiResponse::success(SessionDto::from_dispatcher(session_id, &dispatcher))
        }
        Err(err) => err.into(),
    }
}

/// Mark the chat panel open.
#[utoipa::path(
    post,
    path = "/api/v1/chat/sessions/{sessionId}/open",
    tag = "chat",
    params(("sessionId" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Panel opened", body = SessionDto),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn open_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<SessionDto> {
    match lookup(&state, &session_id) {
        Ok(dispatcher) => {
            dispatcher.open();
            ApiResponse::success(SessionDto::from_dispatcher(session_id, &dispatcher))
        }
        Err(err) => err.into(),
    }
}

/// Mark the chat panel closed. The transcript is retained.
#[utoipa::path(
    post,
    path = "/api/v1/chat/sessions/{sessionId}/close",
    tag = "chat",
    params(("sessionId" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Panel closed", body = SessionDto),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<SessionDto> {
    match lookup(&state, &session_id) {
        Ok(dispatcher) => {
            dispatcher.close();
            ApiResponse::success(SessionDto::from_dispatcher(session_id, &dispatcher))
        }
        Err(err) => err.into(),
    }
}
