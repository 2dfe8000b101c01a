//! Domain model for savings ledger entries.
//!
//! The savings ledger is append-only: entries are never updated or deleted,
//! and every total the system reports is a fresh summation over the entries.
//! There is no denormalized savings counter anywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::MonthKey;

/// Where an accrual came from. `Leftover` is modeled for the breakdown but
/// no automatic sweep populates it; entries with that source only appear if
/// the host application records them explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsSource {
    Mandatory,
    Leftover,
}

impl SavingsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavingsSource::Mandatory => "mandatory",
            SavingsSource::Leftover => "leftover",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEntry {
    pub id: String,
    pub user_id: String,
    pub month: MonthKey,
    pub amount: f64,
    pub source: SavingsSource,
    pub created_at: DateTime<Utc>,
}

impl SavingsEntry {
    /// Generate a unique savings entry ID.
    pub fn generate_id() -> String {
        format!("savings::{}", Uuid::new_v4())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SavingsValidationError {
    #[error("Savings amount must be positive")]
    NonPositiveAmount,
    #[error("Savings amount must be a finite number")]
    NonFiniteAmount,
}
