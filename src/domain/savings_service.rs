//! Savings ledger accounting.
//!
//! Every total here is a fresh summation over the append-only ledger.
//! There is deliberately no cached aggregate to keep consistent: if the
//! entries are right, every report derived from them is right.

use anyhow::Result;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::commands::savings::{
    MonthlySavingsTotal, RecordSavingsCommand, RecordSavingsResult, SavingsBreakdown,
};
use crate::domain::models::month::MonthKey;
use crate::domain::models::savings::{SavingsEntry, SavingsSource, SavingsValidationError};
use crate::storage::traits::{Connection, SavingsStorage};

/// Service for the append-only savings ledger
#[derive(Clone)]
pub struct SavingsService<C: Connection> {
    savings_repository: C::SavingsRepository,
}

impl<C: Connection> SavingsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let savings_repository = connection.create_savings_repository();
        Self { savings_repository }
    }

    /// Append one entry to the ledger. The rollover engine calls this with
    /// `Mandatory`; `Leftover` is accepted for host applications that sweep
    /// unspent budget manually, but nothing in the engine does so.
    pub fn record_savings(&self, command: RecordSavingsCommand) -> Result<RecordSavingsResult> {
        info!(
            "Recording {} savings for {} {}: {:.2}",
            command.source.as_str(),
            command.user_id,
            command.month,
            command.amount
        );

        if !command.amount.is_finite() {
            return Err(SavingsValidationError::NonFiniteAmount.into());
        }
        if command.amount <= 0.0 {
            return Err(SavingsValidationError::NonPositiveAmount.into());
        }

        let entry = SavingsEntry {
            id: SavingsEntry::generate_id(),
            user_id: command.user_id,
            month: command.month,
            amount: command.amount,
            source: command.source,
            created_at: chrono::Utc::now(),
        };
        self.savings_repository.store_entry(&entry)?;

        Ok(RecordSavingsResult { entry })
    }

    /// The raw entries for one month.
    pub fn month_entries(&self, user_id: &str, month: &MonthKey) -> Result<Vec<SavingsEntry>> {
        self.savings_repository.list_for_month(user_id, month)
    }

    /// Sum over every entry the user has, all months.
    pub fn total_savings(&self, user_id: &str) -> Result<f64> {
        let entries = self.savings_repository.list_for_user(user_id)?;
        Ok(entries.iter().map(|entry| entry.amount).sum())
    }

    /// Sum over one month's entries.
    pub fn month_savings(&self, user_id: &str, month: &MonthKey) -> Result<f64> {
        let entries = self.month_entries(user_id, month)?;
        Ok(entries.iter().map(|entry| entry.amount).sum())
    }

    /// Partition one month's savings by source.
    pub fn breakdown(&self, user_id: &str, month: &MonthKey) -> Result<SavingsBreakdown> {
        let entries = self.month_entries(user_id, month)?;
        let mandatory: f64 = entries
            .iter()
            .filter(|entry| entry.source == SavingsSource::Mandatory)
            .map(|entry| entry.amount)
            .sum();
        let leftover: f64 = entries
            .iter()
            .filter(|entry| entry.source == SavingsSource::Leftover)
            .map(|entry| entry.amount)
            .sum();
        Ok(SavingsBreakdown {
            mandatory,
            leftover,
            total: mandatory + leftover,
        })
    }

    /// Per-month totals, most recent month first, at most `limit` rows.
    pub fn history(&self, user_id: &str, limit: usize) -> Result<Vec<MonthlySavingsTotal>> {
        let entries = self.savings_repository.list_for_user(user_id)?;

        let mut by_month: HashMap<MonthKey, f64> = HashMap::new();
        for entry in &entries {
            *by_month.entry(entry.month).or_insert(0.0) += entry.amount;
        }

        let mut history: Vec<MonthlySavingsTotal> = by_month
            .into_iter()
            .map(|(month, total)| MonthlySavingsTotal { month, total })
            .collect();
        history.sort_by(|a, b| b.month.cmp(&a.month));
        history.truncate(limit);
        Ok(history)
    }
}
