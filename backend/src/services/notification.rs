//! In-app notification service
//!
//! Notifications are written by the application, business, and franchise
//! flows after their primary records commit. The nil-UUID system sender is
//! used for platform-generated notices that have no human author.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{NotificationKind, ReadStatus, SYSTEM_SENDER};

/// Notification service for user-facing alerts
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
}

/// Notification record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Uuid,
    pub kind: String,
    pub subject_id: Option<Uuid>,
    pub content: String,
    pub read_status: String,
    pub created_at: DateTime<Utc>,
}

/// Notification with the sender's display name resolved
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NotificationWithSender {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Uuid,
    pub sender_username: String,
    pub kind: String,
    pub subject_id: Option<Uuid>,
    pub content: String,
    pub read_status: String,
    pub created_at: DateTime<Utc>,
}

/// Input for marking a notification read or unread
#[derive(Debug, Deserialize)]
pub struct UpdateReadStatusInput {
    pub read_status: String,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert a notification for a user
    pub async fn insert_notification(
        &self,
        recipient_id: Uuid,
        sender_id: Uuid,
        kind: NotificationKind,
        subject_id: Option<Uuid>,
        content: &str,
    ) -> AppResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (recipient_id, sender_id, kind, subject_id, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, recipient_id, sender_id, kind, subject_id, content, read_status, created_at
            "#,
        )
        .bind(recipient_id)
        .bind(sender_id)
        .bind(kind.as_str())
        .bind(subject_id)
        .bind(content)
        .fetch_one(&self.db)
        .await?;

        Ok(notification)
    }

    /// Get all notifications for a user, newest first
    pub async fn get_notifications(&self, user_id: Uuid) -> AppResult<Vec<NotificationWithSender>> {
        let notifications = sqlx::query_as::<_, NotificationWithSender>(
            r#"
            SELECT n.id, n.recipient_id, n.sender_id,
                   COALESCE(u.username, 'System') as sender_username,
                   n.kind, n.subject_id, n.content, n.read_status, n.created_at
            FROM notifications n
            LEFT JOIN users u ON u.id = n.sender_id
            WHERE n.recipient_id = $1
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(notifications)
    }

    /// Update the read status of a notification owned by the user
    pub async fn update_read_status(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
        input: UpdateReadStatusInput,
    ) -> AppResult<Notification> {
        let read_status: ReadStatus =
            input
                .read_status
                .parse()
                .map_err(|_| AppError::Validation {
                    field: "read_status".to_string(),
                    message: "read_status must be 'read' or 'unread'".to_string(),
                })?;

        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET read_status = $1
            WHERE id = $2 AND recipient_id = $3
            RETURNING id, recipient_id, sender_id, kind, subject_id, content, read_status, created_at
            "#,
        )
        .bind(read_status.as_str())
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification".to_string()))?;

        Ok(notification)
    }

    /// Count unread notifications for a user
    pub async fn unread_count(&self, user_id: Uuid) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND read_status = 'unread'",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    /// Insert a platform-generated notification with the system sender
    pub async fn insert_system_notification(
        &self,
        recipient_id: Uuid,
        kind: NotificationKind,
        subject_id: Option<Uuid>,
        content: &str,
    ) -> AppResult<Notification> {
        self.insert_notification(recipient_id, SYSTEM_SENDER, kind, subject_id, content)
            .await
    }
}
