//! Monthly income management.
//!
//! One income record exists per `(user, month)` pair. Both mutation paths
//! are store-side upserts keyed on that pair, so repeated sets and top-ups
//! can never produce duplicates and concurrent top-ups never lose an
//! update to a read-then-write race.

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::domain::commands::income::{
    AddToMonthlyIncomeCommand, IncomeResult, SetMonthlyIncomeCommand,
};
use crate::domain::models::income::{IncomeValidationError, MonthlyIncome};
use crate::domain::models::month::MonthKey;
use crate::storage::traits::{Connection, IncomeStorage};

/// Service for managing monthly income records
#[derive(Clone)]
pub struct IncomeService<C: Connection> {
    income_repository: C::IncomeRepository,
}

impl<C: Connection> IncomeService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let income_repository = connection.create_income_repository();
        Self { income_repository }
    }

    fn validate_amount(amount: f64) -> Result<()> {
        if !amount.is_finite() {
            return Err(IncomeValidationError::NonFiniteAmount.into());
        }
        if amount <= 0.0 {
            return Err(IncomeValidationError::NonPositiveAmount.into());
        }
        Ok(())
    }

    /// Set the income figure for a month, replacing any previous value.
    pub fn set_monthly_income(&self, command: SetMonthlyIncomeCommand) -> Result<IncomeResult> {
        info!(
            "Setting income for {} {}: {:.2}",
            command.user_id, command.month, command.amount
        );
        Self::validate_amount(command.amount)?;

        let income =
            self.income_repository
                .upsert_set(&command.user_id, &command.month, command.amount)?;
        Ok(IncomeResult { income })
    }

    /// Add extra income on top of the month's existing figure. Creates the
    /// record when no figure has been set yet.
    pub fn add_to_monthly_income(&self, command: AddToMonthlyIncomeCommand) -> Result<IncomeResult> {
        info!(
            "Adding income for {} {}: {:.2}",
            command.user_id, command.month, command.amount
        );
        Self::validate_amount(command.amount)?;

        let income =
            self.income_repository
                .upsert_add(&command.user_id, &command.month, command.amount)?;
        Ok(IncomeResult { income })
    }

    /// The income record for a month, if one exists.
    pub fn monthly_income(&self, user_id: &str, month: &MonthKey) -> Result<Option<MonthlyIncome>> {
        self.income_repository.get_income(user_id, month)
    }

    /// Income records across months, most recent month first.
    pub fn income_history(&self, user_id: &str, limit: usize) -> Result<Vec<MonthlyIncome>> {
        let mut records = self.income_repository.list_for_user(user_id)?;
        records.sort_by(|a, b| b.month.cmp(&a.month));
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryConnection;

    fn setup() -> IncomeService<MemoryConnection> {
        IncomeService::new(Arc::new(MemoryConnection::new()))
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_set_then_adds_accumulate_on_one_record() {
        let service = setup();
        service
            .set_monthly_income(SetMonthlyIncomeCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                amount: 50000.0,
            })
            .unwrap();
        service
            .add_to_monthly_income(AddToMonthlyIncomeCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                amount: 3000.0,
            })
            .unwrap();
        service
            .add_to_monthly_income(AddToMonthlyIncomeCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                amount: 2000.0,
            })
            .unwrap();

        // Exactly one record for the pair, amount = set value + later adds.
        let record = service
            .monthly_income("u1", &month("2026-02"))
            .unwrap()
            .unwrap();
        assert_eq!(record.amount, 55000.0);
        assert_eq!(service.income_history("u1", 12).unwrap().len(), 1);
    }

    #[test]
    fn test_set_after_adds_replaces_the_amount() {
        let service = setup();
        service
            .add_to_monthly_income(AddToMonthlyIncomeCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                amount: 4000.0,
            })
            .unwrap();
        service
            .set_monthly_income(SetMonthlyIncomeCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                amount: 60000.0,
            })
            .unwrap();

        let record = service
            .monthly_income("u1", &month("2026-02"))
            .unwrap()
            .unwrap();
        assert_eq!(record.amount, 60000.0);
    }

    #[test]
    fn test_add_without_prior_set_creates_the_record() {
        let service = setup();
        let result = service
            .add_to_monthly_income(AddToMonthlyIncomeCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                amount: 1500.0,
            })
            .unwrap();
        assert_eq!(result.income.amount, 1500.0);
    }

    #[test]
    fn test_non_positive_amounts_are_rejected_before_any_write() {
        let service = setup();
        for amount in [0.0, -100.0, f64::NAN, f64::INFINITY] {
            let result = service.set_monthly_income(SetMonthlyIncomeCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                amount,
            });
            assert!(result.is_err(), "amount {} should be rejected", amount);
        }
        assert!(service
            .monthly_income("u1", &month("2026-02"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_history_is_month_descending_and_truncated() {
        let service = setup();
        for (m, amount) in [("2025-11", 1.0), ("2026-01", 3.0), ("2025-12", 2.0)] {
            service
                .set_monthly_income(SetMonthlyIncomeCommand {
                    user_id: "u1".to_string(),
                    month: month(m),
                    amount,
                })
                .unwrap();
        }

        let history = service.income_history("u1", 2).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].month, month("2026-01"));
        assert_eq!(history[1].month, month("2025-12"));
    }
}
