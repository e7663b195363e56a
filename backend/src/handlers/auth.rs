//! HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{AuthResponse, AuthService, UserProfile};
use crate::AppState;
use shared::{LoginInput, RegisterBusinessInput, RegisterUserInput};

/// Register a new investor account
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUserInput>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let service = AuthService::new(state.db, &state.config);
    let response = service.register_user(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Register a business together with its owner account
pub async fn register_business(
    State(state): State<AppState>,
    Json(input): Json<RegisterBusinessInput>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let service = AuthService::new(state.db, &state.config);
    let response = service.register_business(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    let service = AuthService::new(state.db, &state.config);
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Get the current user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserProfile>> {
    let service = AuthService::new(state.db, &state.config);
    let profile = service.get_profile(current_user.0.user_id).await?;
    Ok(Json(profile))
}
