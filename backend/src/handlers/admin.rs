//! HTTP handlers for platform administration endpoints
//!
//! Admin access is granted to the account whose email matches the
//! configured admin address; there is no separate admin user type.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::admin::{AdminService, AdminUserView, DashboardMetrics};
use crate::services::business::{Business, BusinessForReview, UpdateBusinessStatusInput};
use crate::services::BusinessService;
use crate::AppState;

fn require_admin(state: &AppState, current_user: &CurrentUser) -> AppResult<()> {
    if current_user.0.is_admin(&state.config.admin.email) {
        Ok(())
    } else {
        Err(AppError::InsufficientPermissions)
    }
}

/// Get platform-wide dashboard counters
pub async fn get_dashboard_metrics(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<DashboardMetrics>> {
    require_admin(&state, &current_user)?;

    let service = AdminService::new(state.db);
    let metrics = service.dashboard_metrics().await?;
    Ok(Json(metrics))
}

/// List all user accounts
pub async fn list_all_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<AdminUserView>>> {
    require_admin(&state, &current_user)?;

    let service = AdminService::new(state.db);
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// List every business for the review queue
pub async fn list_businesses_for_review(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<BusinessForReview>>> {
    require_admin(&state, &current_user)?;

    let service = BusinessService::new(state.db);
    let businesses = service.list_businesses_for_review().await?;
    Ok(Json(businesses))
}

/// Apply an approval decision to a business
pub async fn update_business_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(business_id): Path<Uuid>,
    Json(input): Json<UpdateBusinessStatusInput>,
) -> AppResult<Json<Business>> {
    require_admin(&state, &current_user)?;

    let service = BusinessService::new(state.db);
    let business = service.update_business_status(business_id, input).await?;
    Ok(Json(business))
}
