//! Financial reporting models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input for submitting a financial entry against an agreed application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitFinancialEntryInput {
    pub investor_id: Uuid,
    pub business_id: Uuid,
    pub entry_date: NaiveDate,
    pub description: Option<String>,
    pub investment_amount: Decimal,
    pub income_amount: Decimal,
}
