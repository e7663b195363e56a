//! HTTP handlers for business discovery endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::business::{Business, BusinessService};
use crate::AppState;

/// List approved businesses for investor browsing
pub async fn list_businesses(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Business>>> {
    let service = BusinessService::new(state.db);
    let businesses = service.list_approved_businesses().await?;
    Ok(Json(businesses))
}

/// Get a business by ID
pub async fn get_business(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<Business>> {
    let service = BusinessService::new(state.db);
    let business = service.get_business(business_id).await?;
    Ok(Json(business))
}
