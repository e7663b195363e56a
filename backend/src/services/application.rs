//! Investment application lifecycle service
//!
//! Covers application intake, the two-track status review (business review
//! and investor verification), investor promotion to franchise, and
//! franchise removal with its verification cascade.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::{MessageService, NotificationService};
use crate::error::{AppError, AppResult};
use shared::{
    validation, ApprovalStatus, NotificationKind, SubmitApplicationInput,
    UpdateApplicationStatusInput,
};

/// Application service for the investment application lifecycle
#[derive(Clone)]
pub struct ApplicationService {
    db: PgPool,
}

/// Application record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Application {
    pub id: Uuid,
    pub investor_id: Uuid,
    pub business_id: Uuid,
    pub investment_amount: Decimal,
    pub investment_plan_details: Option<String>,
    pub prior_investment_experience: Option<String>,
    pub purpose_of_investment: Option<String>,
    pub duration_of_investment: Option<String>,
    pub relevant_documents: Option<String>,
    pub application_status: String,
    pub investor_verification_status: String,
    pub approval_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Agreed application joined with the investor's account details
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FranchiseeView {
    pub id: Uuid,
    pub investor_id: Uuid,
    pub business_id: Uuid,
    pub investor_username: String,
    pub investor_email: String,
    pub investor_contact_info: Option<String>,
    pub investment_amount: Decimal,
    pub approval_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Agreed application joined with the business it targets
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FranchiseView {
    pub id: Uuid,
    pub investor_id: Uuid,
    pub business_id: Uuid,
    pub business_name: String,
    pub investment_amount: Decimal,
    pub approval_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Acknowledgement of a status update; callers re-fetch the application
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateAck {
    pub application_id: Uuid,
    pub promoted_to_franchise: bool,
}

/// Result of removing a franchise relationship
#[derive(Debug, Clone, Serialize)]
pub struct FranchiseRemovalOutcome {
    pub application_id: Uuid,
    pub cancelled_verifications: u64,
}

const APPLICATION_COLUMNS: &str = "id, investor_id, business_id, investment_amount, \
     investment_plan_details, prior_investment_experience, purpose_of_investment, \
     duration_of_investment, relevant_documents, application_status, \
     investor_verification_status, approval_date, created_at, updated_at";

/// Compose the submission notice delivered to the business owner.
///
/// Submitted fields appear as `key: value` lines; blank optional fields are
/// omitted. The trailing `application_id` line is kept for clients that
/// parse the id out of the body.
pub fn submission_message_body(input: &SubmitApplicationInput, application_id: Uuid) -> String {
    let mut lines = vec![format!("investment_amount: {}", input.investment_amount)];

    let optional_fields = [
        ("investment_plan_details", &input.investment_plan_details),
        (
            "prior_investment_experience",
            &input.prior_investment_experience,
        ),
        ("purpose_of_investment", &input.purpose_of_investment),
        ("duration_of_investment", &input.duration_of_investment),
        ("relevant_documents", &input.relevant_documents),
    ];
    for (key, value) in optional_fields {
        if let Some(value) = value {
            lines.push(format!("{}: {}", key, value));
        }
    }

    format!(
        "New form submission -- {}\napplication_id: {}",
        lines.join("\n"),
        application_id
    )
}

impl ApplicationService {
    /// Create a new ApplicationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Submit a new investment application.
    ///
    /// Preconditions (investor and business must exist) are checked before
    /// anything is written, so a failed submission leaves no partial state.
    /// The notice to the business owner is sent after the insert; a failure
    /// there surfaces as a downstream-write error without undoing the
    /// application.
    pub async fn submit_application(
        &self,
        input: SubmitApplicationInput,
    ) -> AppResult<Application> {
        validation::validate_investment_amount(input.investment_amount).map_err(|msg| {
            AppError::Validation {
                field: "investment_amount".to_string(),
                message: msg.to_string(),
            }
        })?;

        let investor_username =
            sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = $1")
                .bind(input.investor_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Investor".to_string()))?;

        let owner_id =
            sqlx::query_scalar::<_, Uuid>("SELECT owner_id FROM businesses WHERE id = $1")
                .bind(input.business_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        let application = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (investor_id, business_id, investment_amount,
                                      investment_plan_details, prior_investment_experience,
                                      purpose_of_investment, duration_of_investment,
                                      relevant_documents)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(input.investor_id)
        .bind(input.business_id)
        .bind(input.investment_amount)
        .bind(&input.investment_plan_details)
        .bind(&input.prior_investment_experience)
        .bind(&input.purpose_of_investment)
        .bind(&input.duration_of_investment)
        .bind(&input.relevant_documents)
        .fetch_one(&self.db)
        .await?;

        // Notify the business owner after the application is durable
        let body = submission_message_body(&input, application.id);
        let messages = MessageService::new(self.db.clone());
        messages
            .send_application_notice(input.investor_id, owner_id, &body, application.id)
            .await
            .map_err(|e| {
                AppError::DownstreamWrite(format!("submission message failed: {}", e))
            })?;

        let notifications = NotificationService::new(self.db.clone());
        notifications
            .insert_notification(
                owner_id,
                input.investor_id,
                NotificationKind::Application,
                None,
                &format!("New form submission by {}", investor_username),
            )
            .await
            .map_err(|e| {
                AppError::DownstreamWrite(format!("submission notification failed: {}", e))
            })?;

        Ok(application)
    }

    /// Get an application by ID
    pub async fn get_application(&self, application_id: Uuid) -> AppResult<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(application_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Application".to_string()))?;

        Ok(application)
    }

    /// Update one or both status tracks of an application.
    ///
    /// Status values are parsed case-insensitively. On the business track,
    /// agreement stamps the approval date and `pending` is a no-op; the
    /// verification track stores whatever was provided, and agreement there
    /// promotes the investor to franchise within the same transaction. The
    /// row is locked so concurrent reviewers serialize. Messages and
    /// notifications to the investor are written after commit.
    pub async fn update_status(
        &self,
        application_id: Uuid,
        input: UpdateApplicationStatusInput,
    ) -> AppResult<StatusUpdateAck> {
        let application_status = input
            .application_status
            .as_deref()
            .map(parse_status_field("application_status"))
            .transpose()?;
        let verification_status = input
            .investor_verification_status
            .as_deref()
            .map(parse_status_field("investor_verification_status"))
            .transpose()?;

        if application_status.is_none() && verification_status.is_none() {
            return Err(AppError::ValidationError(
                "At least one status field must be provided".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let existing = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = $1 FOR UPDATE",
            APPLICATION_COLUMNS
        ))
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Application".to_string()))?;

        // Pending never overwrites the business track; there is no
        // terminal-state guard otherwise
        let new_application_status = match application_status {
            Some(ApprovalStatus::Agreed) => ApprovalStatus::Agreed.as_str().to_string(),
            Some(ApprovalStatus::Cancelled) => ApprovalStatus::Cancelled.as_str().to_string(),
            Some(ApprovalStatus::Pending) | None => existing.application_status.clone(),
        };
        let new_verification_status = verification_status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| existing.investor_verification_status.clone());
        let stamp_approval = application_status == Some(ApprovalStatus::Agreed);

        sqlx::query(
            r#"
            UPDATE applications
            SET application_status = $1,
                investor_verification_status = $2,
                approval_date = CASE WHEN $3 THEN NOW() ELSE approval_date END,
                updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(&new_application_status)
        .bind(&new_verification_status)
        .bind(stamp_approval)
        .bind(application_id)
        .execute(&mut *tx)
        .await?;

        // Verification agreement promotes the investor to franchise
        let promoted = verification_status == Some(ApprovalStatus::Agreed);
        if promoted {
            sqlx::query(
                r#"
                UPDATE users
                SET user_type = 'franchise', verification_status = 'agreed', updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(existing.investor_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        // Side effects run after the update is durable; a missing business
        // here leaves the committed mutation in place
        let (owner_id, business_name) = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT owner_id, business_name FROM businesses WHERE id = $1",
        )
        .bind(existing.business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        if application_status == Some(ApprovalStatus::Agreed) {
            let body = format!(
                "Congratulations! Your application has been agreed for {}",
                business_name
            );
            let messages = MessageService::new(self.db.clone());
            messages
                .send_application_notice(owner_id, existing.investor_id, &body, application_id)
                .await
                .map_err(|e| {
                    AppError::DownstreamWrite(format!("agreement message failed: {}", e))
                })?;
        }

        if let Some(decision) = decision_notice(application_status, &business_name) {
            let notifications = NotificationService::new(self.db.clone());
            notifications
                .insert_notification(
                    existing.investor_id,
                    owner_id,
                    NotificationKind::ApplicationStatusUpdate,
                    Some(application_id),
                    &decision,
                )
                .await
                .map_err(|e| {
                    AppError::DownstreamWrite(format!("status notification failed: {}", e))
                })?;
        }

        Ok(StatusUpdateAck {
            application_id,
            promoted_to_franchise: promoted,
        })
    }

    /// Remove a franchise relationship.
    ///
    /// Cancels both status tracks of the target application, cancels the
    /// verification track on every application of that investor, and demotes
    /// the investor back to a plain user. The investor is notified after
    /// commit.
    pub async fn remove_franchise(
        &self,
        application_id: Uuid,
    ) -> AppResult<FranchiseRemovalOutcome> {
        let mut tx = self.db.begin().await?;

        let investor_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT investor_id FROM applications WHERE id = $1 FOR UPDATE",
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Application".to_string()))?;

        sqlx::query(
            r#"
            UPDATE applications
            SET application_status = 'cancelled', investor_verification_status = 'cancelled',
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(application_id)
        .execute(&mut *tx)
        .await?;

        // Every verification held by this investor is withdrawn, not just
        // the one on the removed application
        let cascade = sqlx::query(
            r#"
            UPDATE applications
            SET investor_verification_status = 'cancelled', updated_at = NOW()
            WHERE investor_id = $1 AND id <> $2
              AND investor_verification_status <> 'cancelled'
            "#,
        )
        .bind(investor_id)
        .bind(application_id)
        .execute(&mut *tx)
        .await?;

        // With no verification left standing, the franchise role is revoked
        sqlx::query(
            r#"
            UPDATE users
            SET user_type = 'user', verification_status = 'pending', updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(investor_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let notifications = NotificationService::new(self.db.clone());
        notifications
            .insert_system_notification(
                investor_id,
                NotificationKind::FranchiseRemoved,
                Some(application_id),
                "Your franchise relationship has been removed",
            )
            .await
            .map_err(|e| {
                AppError::DownstreamWrite(format!("removal notification failed: {}", e))
            })?;

        Ok(FranchiseRemovalOutcome {
            application_id,
            cancelled_verifications: cascade.rows_affected(),
        })
    }

    /// List the franchisees of a business: applications agreed on both
    /// tracks, joined with the investor's identity, newest first
    pub async fn list_business_franchisees(
        &self,
        business_id: Uuid,
    ) -> AppResult<Vec<FranchiseeView>> {
        let franchisees = sqlx::query_as::<_, FranchiseeView>(
            r#"
            SELECT a.id, a.investor_id, a.business_id,
                   u.username as investor_username, u.email as investor_email,
                   u.contact_info as investor_contact_info,
                   a.investment_amount, a.approval_date, a.created_at
            FROM applications a
            JOIN users u ON u.id = a.investor_id
            WHERE a.business_id = $1
              AND a.application_status = 'agreed'
              AND a.investor_verification_status = 'agreed'
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.db)
        .await?;

        Ok(franchisees)
    }

    /// List the franchises an investor belongs to: applications agreed on
    /// both tracks, joined with the business, newest first
    pub async fn list_investor_franchises(
        &self,
        investor_id: Uuid,
    ) -> AppResult<Vec<FranchiseView>> {
        let franchises = sqlx::query_as::<_, FranchiseView>(
            r#"
            SELECT a.id, a.investor_id, a.business_id, b.business_name,
                   a.investment_amount, a.approval_date, a.created_at
            FROM applications a
            JOIN businesses b ON b.id = a.business_id
            WHERE a.investor_id = $1
              AND a.application_status = 'agreed'
              AND a.investor_verification_status = 'agreed'
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(investor_id)
        .fetch_all(&self.db)
        .await?;

        Ok(franchises)
    }
}

fn parse_status_field(field: &'static str) -> impl Fn(&str) -> AppResult<ApprovalStatus> {
    move |raw| {
        raw.parse::<ApprovalStatus>()
            .map_err(|_| AppError::Validation {
                field: field.to_string(),
                message: format!(
                    "'{}' is not a valid status (expected pending, agreed, or cancelled)",
                    raw
                ),
            })
    }
}

/// Notification text for a terminal business-track decision; pending and
/// verification-only updates generate none
fn decision_notice(
    application_status: Option<ApprovalStatus>,
    business_name: &str,
) -> Option<String> {
    match application_status {
        Some(ApprovalStatus::Agreed) => Some(format!(
            "Your application has been agreed for {}",
            business_name
        )),
        Some(ApprovalStatus::Cancelled) => Some(format!(
            "Your application has been cancelled for {}",
            business_name
        )),
        _ => None,
    }
}
