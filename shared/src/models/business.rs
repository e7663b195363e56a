//! Business registration models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input for registering a business together with its owner account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterBusinessInput {
    pub business_name: String,
    pub owner_username: String,
    pub email: String,
    pub password: String,
    pub description: Option<String>,
    pub industry_type: Option<String>,
    pub registered_address: Option<String>,
    pub contact_info: Option<String>,
    pub minimum_investment: Option<Decimal>,
    pub investment_details: Option<String>,
    pub franchise_opportunities: Option<String>,
}
