//! Business approval and listing service
//!
//! Businesses register in 'pending' status and are reviewed by the platform
//! admin. Approval decisions notify the owner through the system sender.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::NotificationService;
use crate::error::{AppError, AppResult};
use shared::{ApprovalStatus, NotificationKind};

/// Business service for approval and discovery
#[derive(Clone)]
pub struct BusinessService {
    db: PgPool,
}

/// Business record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Business {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub business_name: String,
    pub description: Option<String>,
    pub industry_type: Option<String>,
    pub registered_address: Option<String>,
    pub contact_info: Option<String>,
    pub minimum_investment: Option<Decimal>,
    pub investment_details: Option<String>,
    pub franchise_opportunities: Option<String>,
    pub business_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Business joined with its owner's account details, for the review queue
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BusinessForReview {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner_username: String,
    pub owner_email: String,
    pub business_name: String,
    pub industry_type: Option<String>,
    pub business_status: String,
    pub created_at: DateTime<Utc>,
}

/// Input for the admin approval decision
#[derive(Debug, Deserialize)]
pub struct UpdateBusinessStatusInput {
    pub business_status: String,
}

impl BusinessService {
    /// Create a new BusinessService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get a business by ID
    pub async fn get_business(&self, business_id: Uuid) -> AppResult<Business> {
        let business = sqlx::query_as::<_, Business>(
            r#"
            SELECT id, owner_id, business_name, description, industry_type,
                   registered_address, contact_info, minimum_investment,
                   investment_details, franchise_opportunities, business_status,
                   created_at, updated_at
            FROM businesses
            WHERE id = $1
            "#,
        )
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        Ok(business)
    }

    /// List approved businesses for investor browsing, newest first
    pub async fn list_approved_businesses(&self) -> AppResult<Vec<Business>> {
        let businesses = sqlx::query_as::<_, Business>(
            r#"
            SELECT id, owner_id, business_name, description, industry_type,
                   registered_address, contact_info, minimum_investment,
                   investment_details, franchise_opportunities, business_status,
                   created_at, updated_at
            FROM businesses
            WHERE business_status = 'agreed'
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(businesses)
    }

    /// List every business for the admin review queue, regardless of status
    pub async fn list_businesses_for_review(&self) -> AppResult<Vec<BusinessForReview>> {
        let businesses = sqlx::query_as::<_, BusinessForReview>(
            r#"
            SELECT b.id, b.owner_id, u.username as owner_username, u.email as owner_email,
                   b.business_name, b.industry_type, b.business_status, b.created_at
            FROM businesses b
            JOIN users u ON u.id = b.owner_id
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(businesses)
    }

    /// Apply the admin approval decision to a business.
    ///
    /// The owner is notified after the status is durable; terminal decisions
    /// (agreed or cancelled) are the ones that generate a notice.
    pub async fn update_business_status(
        &self,
        business_id: Uuid,
        input: UpdateBusinessStatusInput,
    ) -> AppResult<Business> {
        let status = input
            .business_status
            .parse::<ApprovalStatus>()
            .map_err(|_| AppError::Validation {
                field: "business_status".to_string(),
                message: format!(
                    "'{}' is not a valid status (expected pending, agreed, or cancelled)",
                    input.business_status
                ),
            })?;

        let mut tx = self.db.begin().await?;

        let owner_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT owner_id FROM businesses WHERE id = $1 FOR UPDATE",
        )
        .bind(business_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        let business = sqlx::query_as::<_, Business>(
            r#"
            UPDATE businesses
            SET business_status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, owner_id, business_name, description, industry_type,
                      registered_address, contact_info, minimum_investment,
                      investment_details, franchise_opportunities, business_status,
                      created_at, updated_at
            "#,
        )
        .bind(status.as_str())
        .bind(business_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if matches!(status, ApprovalStatus::Agreed | ApprovalStatus::Cancelled) {
            let content = match status {
                ApprovalStatus::Agreed => "Your business has been approved and is now visible to investors",
                _ => "Your business registration was not approved",
            };

            let notifications = NotificationService::new(self.db.clone());
            notifications
                .insert_system_notification(
                    owner_id,
                    NotificationKind::BusinessStatusUpdate,
                    None,
                    content,
                )
                .await
                .map_err(|e| {
                    AppError::DownstreamWrite(format!("business status notification failed: {}", e))
                })?;
        }

        Ok(business)
    }
}
