//! Platform administration service

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Admin service for platform-level views
#[derive(Clone)]
pub struct AdminService {
    db: PgPool,
}

/// Dashboard counters shown on the admin overview
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DashboardMetrics {
    pub total_users: i64,
    pub total_businesses: i64,
    pub pending_businesses: i64,
    pub total_applications: i64,
    pub pending_applications: i64,
    pub agreed_applications: i64,
    pub franchise_users: i64,
}

/// Platform user summary for the admin user list
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminUserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub user_type: String,
    pub verification_status: String,
}

impl AdminService {
    /// Create a new AdminService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Collect platform-wide counters for the admin dashboard
    pub async fn dashboard_metrics(&self) -> AppResult<DashboardMetrics> {
        let metrics = sqlx::query_as::<_, DashboardMetrics>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) as total_users,
                (SELECT COUNT(*) FROM businesses) as total_businesses,
                (SELECT COUNT(*) FROM businesses WHERE business_status = 'pending') as pending_businesses,
                (SELECT COUNT(*) FROM applications) as total_applications,
                (SELECT COUNT(*) FROM applications WHERE application_status = 'pending') as pending_applications,
                (SELECT COUNT(*) FROM applications
                 WHERE application_status = 'agreed'
                   AND investor_verification_status = 'agreed') as agreed_applications,
                (SELECT COUNT(*) FROM users WHERE user_type = 'franchise') as franchise_users
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(metrics)
    }

    /// List all user accounts, newest first
    pub async fn list_users(&self) -> AppResult<Vec<AdminUserView>> {
        let users = sqlx::query_as::<_, AdminUserView>(
            r#"
            SELECT id, username, email, user_type, verification_status
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }
}
