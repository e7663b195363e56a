//! Direct messaging service
//!
//! Carries user-to-user chat plus application notices, which are ordinary
//! messages sent on behalf of the investor or the business owner and linked
//! to the application they announce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Message service for direct messages between users
#[derive(Clone)]
pub struct MessageService {
    db: PgPool,
}

/// Message record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub body: String,
    pub related_application_id: Option<Uuid>,
    pub read_status: String,
    pub created_at: DateTime<Utc>,
}

/// Input for sending a message
#[derive(Debug, Deserialize)]
pub struct SendMessageInput {
    pub receiver_id: Uuid,
    pub body: String,
}

/// Chat partner summary for the conversation list
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ChatPartner {
    pub partner_id: Uuid,
    pub partner_username: String,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
}

impl MessageService {
    /// Create a new MessageService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Send a message from one user to another
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        input: SendMessageInput,
    ) -> AppResult<Message> {
        if input.body.trim().is_empty() {
            return Err(AppError::Validation {
                field: "body".to_string(),
                message: "Message body cannot be empty".to_string(),
            });
        }

        let receiver_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = $1")
                .bind(input.receiver_id)
                .fetch_one(&self.db)
                .await?;
        if receiver_exists == 0 {
            return Err(AppError::NotFound("Receiver".to_string()));
        }

        self.insert_message(sender_id, input.receiver_id, &input.body, None)
            .await
    }

    /// Send a message announcing an application event (submission or
    /// agreement), linked to the application. Sender and receiver are
    /// already known to exist when these are emitted.
    pub async fn send_application_notice(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        body: &str,
        application_id: Uuid,
    ) -> AppResult<Message> {
        self.insert_message(sender_id, receiver_id, body, Some(application_id))
            .await
    }

    async fn insert_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        body: &str,
        related_application_id: Option<Uuid>,
    ) -> AppResult<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (sender_id, receiver_id, body, related_application_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sender_id, receiver_id, body, related_application_id,
                      read_status, created_at
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(body)
        .bind(related_application_id)
        .fetch_one(&self.db)
        .await?;

        Ok(message)
    }

    /// Get the conversation between two users, oldest first
    pub async fn get_conversation(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
    ) -> AppResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, receiver_id, body, related_application_id,
                   read_status, created_at
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(partner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(messages)
    }

    /// Get the distinct chat partners of a user with the latest message each
    pub async fn get_chat_partners(&self, user_id: Uuid) -> AppResult<Vec<ChatPartner>> {
        let partners = sqlx::query_as::<_, ChatPartner>(
            r#"
            SELECT DISTINCT ON (partner_id)
                   partner_id,
                   u.username as partner_username,
                   m.body as last_message,
                   m.created_at as last_message_at
            FROM (
                SELECT CASE WHEN sender_id = $1 THEN receiver_id ELSE sender_id END as partner_id,
                       id
                FROM messages
                WHERE sender_id = $1 OR receiver_id = $1
            ) p
            JOIN messages m ON m.id = p.id
            JOIN users u ON u.id = p.partner_id
            ORDER BY partner_id, m.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(partners)
    }

    /// Mark all messages from a partner to this user as read
    pub async fn mark_conversation_read(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read_status = 'read'
            WHERE receiver_id = $1 AND sender_id = $2 AND read_status = 'unread'
            "#,
        )
        .bind(user_id)
        .bind(partner_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected())
    }
}
