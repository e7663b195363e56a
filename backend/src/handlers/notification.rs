//! HTTP handlers for notification endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::notification::{
    Notification, NotificationService, NotificationWithSender, UpdateReadStatusInput,
};
use crate::AppState;

/// Get the current user's notifications, newest first
pub async fn get_notifications(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<NotificationWithSender>>> {
    let service = NotificationService::new(state.db);
    let notifications = service.get_notifications(current_user.0.user_id).await?;
    Ok(Json(notifications))
}

/// Get unread notification count
pub async fn get_unread_count(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.db);
    let count = service.unread_count(current_user.0.user_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// Unread count response
#[derive(Debug, serde::Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// Update the read status of a notification
pub async fn update_notification_read_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(notification_id): Path<Uuid>,
    Json(input): Json<UpdateReadStatusInput>,
) -> AppResult<Json<Notification>> {
    let service = NotificationService::new(state.db);
    let notification = service
        .update_read_status(current_user.0.user_id, notification_id, input)
        .await?;
    Ok(Json(notification))
}
