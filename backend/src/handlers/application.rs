//! HTTP handlers for the investment application lifecycle

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::application::{
    Application, ApplicationService, FranchiseRemovalOutcome, FranchiseView, FranchiseeView,
    StatusUpdateAck,
};
use crate::services::BusinessService;
use crate::AppState;
use shared::{SubmitApplicationInput, UpdateApplicationStatusInput};

/// Submit a new investment application
pub async fn submit_application(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(mut input): Json<SubmitApplicationInput>,
) -> AppResult<(StatusCode, Json<Application>)> {
    // Applications are always filed on behalf of the caller
    input.investor_id = current_user.0.user_id;

    let service = ApplicationService::new(state.db);
    let application = service.submit_application(input).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// Get an application by ID
pub async fn get_application(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(application_id): Path<Uuid>,
) -> AppResult<Json<Application>> {
    let service = ApplicationService::new(state.db);
    let application = service.get_application(application_id).await?;
    Ok(Json(application))
}

/// Update the status tracks of an application.
///
/// Only the owner of the business the application targets, or the platform
/// admin, may review it.
pub async fn update_application_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(application_id): Path<Uuid>,
    Json(input): Json<UpdateApplicationStatusInput>,
) -> AppResult<Json<StatusUpdateAck>> {
    authorize_reviewer(&state, &current_user, application_id).await?;

    let service = ApplicationService::new(state.db);
    let ack = service.update_status(application_id, input).await?;
    Ok(Json(ack))
}

/// Remove a franchise relationship
pub async fn remove_franchise(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(application_id): Path<Uuid>,
) -> AppResult<Json<FranchiseRemovalOutcome>> {
    authorize_reviewer(&state, &current_user, application_id).await?;

    let service = ApplicationService::new(state.db);
    let outcome = service.remove_franchise(application_id).await?;
    Ok(Json(outcome))
}

/// List the franchisees of a business (agreed on both status tracks)
pub async fn get_business_franchisees(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<Vec<FranchiseeView>>> {
    let service = ApplicationService::new(state.db);
    let franchisees = service.list_business_franchisees(business_id).await?;
    Ok(Json(franchisees))
}

/// List the franchises an investor belongs to (agreed on both status tracks)
pub async fn get_investor_franchises(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(investor_id): Path<Uuid>,
) -> AppResult<Json<Vec<FranchiseView>>> {
    let service = ApplicationService::new(state.db);
    let franchises = service.list_investor_franchises(investor_id).await?;
    Ok(Json(franchises))
}

async fn authorize_reviewer(
    state: &AppState,
    current_user: &CurrentUser,
    application_id: Uuid,
) -> AppResult<()> {
    if current_user.0.is_admin(&state.config.admin.email) {
        return Ok(());
    }

    let applications = ApplicationService::new(state.db.clone());
    let application = applications.get_application(application_id).await?;

    let businesses = BusinessService::new(state.db.clone());
    let business = businesses.get_business(application.business_id).await?;

    if business.owner_id != current_user.0.user_id {
        return Err(AppError::InsufficientPermissions);
    }
    Ok(())
}
