//! Health check handler

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::AppState;

/// Health check response
#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Health check including database connectivity
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
    {
        Ok(_) => "connected".to_string(),
        Err(_) => "unavailable".to_string(),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database,
    }))
}
