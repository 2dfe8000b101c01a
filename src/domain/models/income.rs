//! Domain model for a monthly income record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::MonthKey;

/// One income figure per `(user, month)` pair. The storage layer upserts on
/// that pair, so lookups return zero or one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub id: String,
    pub user_id: String,
    pub month: MonthKey,
    pub amount: f64,
    pub locked_at: DateTime<Utc>,
}

impl MonthlyIncome {
    /// Generate a unique income record ID.
    pub fn generate_id() -> String {
        format!("income::{}", Uuid::new_v4())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IncomeValidationError {
    #[error("Income amount must be positive")]
    NonPositiveAmount,
    #[error("Income amount must be a finite number")]
    NonFiniteAmount,
}
