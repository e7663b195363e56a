//! Financial reporting service
//!
//! Entries can only be recorded while the investor and business have an
//! application agreed on both status tracks, and each entry records which
//! agreed application it was shared under. Once written, entries stay
//! readable even after the relationship ends; they are an append-only
//! record, not a live view.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validation, SubmitFinancialEntryInput};

/// Financial service for entries shared between agreed parties
#[derive(Clone)]
pub struct FinancialService {
    db: PgPool,
}

/// Financial entry record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FinancialEntry {
    pub id: Uuid,
    pub investor_id: Uuid,
    pub business_id: Uuid,
    pub application_id: Uuid,
    pub entry_date: NaiveDate,
    pub description: Option<String>,
    pub investment_amount: Decimal,
    pub income_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Aggregated view over a set of financial entries
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FinancialSummary {
    pub entry_count: usize,
    pub total_investment: Decimal,
    pub total_income: Decimal,
    pub net_return: Decimal,
}

/// Compute totals across financial entries
pub fn summarize(entries: &[FinancialEntry]) -> FinancialSummary {
    let total_investment: Decimal = entries.iter().map(|e| e.investment_amount).sum();
    let total_income: Decimal = entries.iter().map(|e| e.income_amount).sum();

    FinancialSummary {
        entry_count: entries.len(),
        total_investment,
        total_income,
        net_return: total_income - total_investment,
    }
}

impl FinancialService {
    /// Create a new FinancialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Find the application between the investor and business that is agreed
    /// on both status tracks. Submission goes through this gate; without
    /// such an application the pair shares no financial data and the caller
    /// gets a not-found error.
    async fn find_agreed_application(
        &self,
        investor_id: Uuid,
        business_id: Uuid,
    ) -> AppResult<Uuid> {
        let application_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM applications
            WHERE investor_id = $1 AND business_id = $2
              AND application_status = 'agreed'
              AND investor_verification_status = 'agreed'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(investor_id)
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Agreed application".to_string()))?;

        Ok(application_id)
    }

    /// Submit a financial entry between agreed parties
    pub async fn submit_entry(
        &self,
        input: SubmitFinancialEntryInput,
    ) -> AppResult<FinancialEntry> {
        validation::validate_investment_amount(input.investment_amount).map_err(|msg| {
            AppError::Validation {
                field: "investment_amount".to_string(),
                message: msg.to_string(),
            }
        })?;
        validation::validate_income_amount(input.income_amount).map_err(|msg| {
            AppError::Validation {
                field: "income_amount".to_string(),
                message: msg.to_string(),
            }
        })?;

        let application_id = self
            .find_agreed_application(input.investor_id, input.business_id)
            .await?;

        let entry = sqlx::query_as::<_, FinancialEntry>(
            r#"
            INSERT INTO financial_entries (investor_id, business_id, application_id,
                                           entry_date, description,
                                           investment_amount, income_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, investor_id, business_id, application_id, entry_date,
                      description, investment_amount, income_amount, created_at
            "#,
        )
        .bind(input.investor_id)
        .bind(input.business_id)
        .bind(application_id)
        .bind(input.entry_date)
        .bind(&input.description)
        .bind(input.investment_amount)
        .bind(input.income_amount)
        .fetch_one(&self.db)
        .await?;

        Ok(entry)
    }

    /// Fetch the financial entries between an investor and a business,
    /// newest first.
    ///
    /// Not gated: entries recorded while the parties were agreed remain
    /// readable after a cancellation or franchise removal. A pair with no
    /// entries gets an empty list, not an error.
    pub async fn get_entries(
        &self,
        investor_id: Uuid,
        business_id: Uuid,
    ) -> AppResult<Vec<FinancialEntry>> {
        let entries = sqlx::query_as::<_, FinancialEntry>(
            r#"
            SELECT id, investor_id, business_id, application_id, entry_date,
                   description, investment_amount, income_amount, created_at
            FROM financial_entries
            WHERE investor_id = $1 AND business_id = $2
            ORDER BY entry_date DESC, created_at DESC
            "#,
        )
        .bind(investor_id)
        .bind(business_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Aggregate the financial entries between an investor and a business
    pub async fn get_summary(
        &self,
        investor_id: Uuid,
        business_id: Uuid,
    ) -> AppResult<FinancialSummary> {
        let entries = self.get_entries(investor_id, business_id).await?;
        Ok(summarize(&entries))
    }
}
