//! HTTP handlers for financial reporting endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::financial::{FinancialEntry, FinancialService, FinancialSummary};
use crate::AppState;
use shared::SubmitFinancialEntryInput;

/// Query parameters identifying the investor/business pair
#[derive(Debug, Deserialize)]
pub struct FinancialPairQuery {
    pub investor_id: Uuid,
    pub business_id: Uuid,
}

/// Submit a financial entry
pub async fn submit_financial_entry(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<SubmitFinancialEntryInput>,
) -> AppResult<(StatusCode, Json<FinancialEntry>)> {
    let service = FinancialService::new(state.db);
    let entry = service.submit_entry(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Fetch financial entries for an investor/business pair
pub async fn get_financial_entries(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<FinancialPairQuery>,
) -> AppResult<Json<Vec<FinancialEntry>>> {
    let service = FinancialService::new(state.db);
    let entries = service
        .get_entries(query.investor_id, query.business_id)
        .await?;
    Ok(Json(entries))
}

/// Aggregate financial entries for an investor/business pair
pub async fn get_financial_summary(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<FinancialPairQuery>,
) -> AppResult<Json<FinancialSummary>> {
    let service = FinancialService::new(state.db);
    let summary = service
        .get_summary(query.investor_id, query.business_id)
        .await?;
    Ok(Json(summary))
}
