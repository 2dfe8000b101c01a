//! Domain model for a mandatory deduction rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring fixed deduction (rent, insurance, ...). Rules are not
/// month-scoped; the rollover engine applies every active rule's effect
/// fresh each month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandatoryRule {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl MandatoryRule {
    /// Generate a unique rule ID.
    pub fn generate_id() -> String {
        format!("rule::{}", Uuid::new_v4())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuleValidationError {
    #[error("Rule name cannot be empty")]
    EmptyName,
    #[error("Rule amount must be positive")]
    NonPositiveAmount,
    #[error("Rule amount must be a finite number")]
    NonFiniteAmount,
}
