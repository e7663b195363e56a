//! HTTP handlers for direct messaging endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::message::{ChatPartner, Message, MessageService, SendMessageInput};
use crate::AppState;

/// Send a message to another user
pub async fn send_message(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<SendMessageInput>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let service = MessageService::new(state.db);
    let message = service.send_message(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Get the conversation with another user, oldest first
pub async fn get_conversation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(partner_id): Path<Uuid>,
) -> AppResult<Json<Vec<Message>>> {
    let service = MessageService::new(state.db);
    let messages = service
        .get_conversation(current_user.0.user_id, partner_id)
        .await?;
    Ok(Json(messages))
}

/// List the current user's chat partners with the latest message each
pub async fn get_chat_partners(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<ChatPartner>>> {
    let service = MessageService::new(state.db);
    let partners = service.get_chat_partners(current_user.0.user_id).await?;
    Ok(Json(partners))
}

/// Mark all messages from a partner as read
pub async fn mark_conversation_read(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(partner_id): Path<Uuid>,
) -> AppResult<Json<MarkReadResponse>> {
    let service = MessageService::new(state.db);
    let marked_count = service
        .mark_conversation_read(current_user.0.user_id, partner_id)
        .await?;
    Ok(Json(MarkReadResponse { marked_count }))
}

/// Mark read response
#[derive(Debug, serde::Serialize)]
pub struct MarkReadResponse {
    pub marked_count: u64,
}
