use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use chirp_types::api::{MessagePatch, NewMessage};

use crate::auth::AppState;
use crate::error::{AppResult, run_blocking};
use crate::extract::ApiJson;

/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewMessage>,
) -> AppResult<impl IntoResponse> {
    let message = run_blocking(move || state.messages.create(&req)).await?;
    Ok(Json(message))
}

/// GET /messages
pub async fn get_messages(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let messages = run_blocking(move || state.messages.list()).await?;
    Ok(Json(messages))
}

/// GET /messages/{message_id} — an absent message is 200 with an empty body.
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> AppResult<Response> {
    let message = run_blocking(move || state.messages.get(message_id)).await?;
    Ok(match message {
        Some(message) => Json(message).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// DELETE /messages/{message_id} — "1" when a row went away, empty otherwise.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> AppResult<Response> {
    let removed = run_blocking(move || state.messages.delete(message_id)).await?;
    Ok(if removed {
        "1".into_response()
    } else {
        StatusCode::OK.into_response()
    })
}

/// PATCH /messages/{message_id}
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    ApiJson(req): ApiJson<MessagePatch>,
) -> AppResult<Response> {
    let updated =
        run_blocking(move || state.messages.update(message_id, &req.message_text)).await?;
    Ok(if updated {
        Json(1).into_response()
    } else {
        StatusCode::BAD_REQUEST.into_response()
    })
}

/// GET /accounts/{account_id}/messages
pub async fn get_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let messages = run_blocking(move || state.messages.list_by_author(account_id)).await?;
    Ok(Json(messages))
}
