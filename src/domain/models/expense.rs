//! Domain model for an expense record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::MonthKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub month: MonthKey,
    pub category_id: String,
    pub amount: f64,
    pub note: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Generate a unique expense ID.
    pub fn generate_id() -> String {
        format!("exp::{}", Uuid::new_v4())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Expense amount must be positive")]
    NonPositiveAmount,
    #[error("Expense amount must be a finite number")]
    NonFiniteAmount,
    #[error("An expense must reference a category")]
    MissingCategory,
}
