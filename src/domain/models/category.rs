//! Domain model for a per-month spending category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::MonthKey;

/// A discretionary spending envelope, distinct per month: "Food" in March
/// and "Food" in April are different records. `spent` starts at zero and is
/// mutated only through the expense ledger's relative increments; budget
/// edits never touch it. Overspending (`spent > budgeted`) is permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub month: MonthKey,
    pub name: String,
    pub budgeted: f64,
    pub spent: f64,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Generate a unique category ID.
    pub fn generate_id() -> String {
        format!("cat::{}", Uuid::new_v4())
    }

    /// Budget remaining after spending. Negative when overspent.
    pub fn remaining(&self) -> f64 {
        self.budgeted - self.spent
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category budget cannot be negative")]
    NegativeBudget,
    #[error("Category budget must be a finite number")]
    NonFiniteBudget,
}
