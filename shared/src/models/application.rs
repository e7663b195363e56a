//! Investment application models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input for submitting an investment application to a business.
///
/// `investor_id` is overwritten server-side with the authenticated caller,
/// so clients may omit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitApplicationInput {
    #[serde(default)]
    pub investor_id: Uuid,
    pub business_id: Uuid,
    pub investment_amount: Decimal,
    pub investment_plan_details: Option<String>,
    pub prior_investment_experience: Option<String>,
    pub purpose_of_investment: Option<String>,
    pub duration_of_investment: Option<String>,
    pub relevant_documents: Option<String>,
}

/// Input for updating one or both status tracks of an application.
///
/// Status values are free-form strings on the wire for compatibility with
/// existing clients; the backend parses them case-insensitively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateApplicationStatusInput {
    pub application_status: Option<String>,
    pub investor_verification_status: Option<String>,
}
