//! Expense recording and removal.
//!
//! An expense mutates its category's spent total in lockstep: creating one
//! increments `spent` by the amount, deleting one decrements it by the same
//! amount. The increment is a commutative relative add at the store level,
//! never a read-modify-write of a cached total, so interleaved mutations on
//! one category cannot lose updates.
//!
//! The two writes (expense record, spent increment) are not one atomic
//! transaction. Removal tolerates a category that has since been deleted:
//! the decrement is skipped and the drift is accepted.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::expenses::{
    RecordExpenseCommand, RecordExpenseResult, RemoveExpenseCommand,
};
use crate::domain::models::expense::{Expense, ExpenseValidationError};
use crate::domain::models::month::MonthKey;
use crate::storage::traits::{CategoryStorage, Connection, ExpenseStorage};

/// Service for recording and removing expenses
#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    category_repository: C::CategoryRepository,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let expense_repository = connection.create_expense_repository();
        let category_repository = connection.create_category_repository();
        Self {
            expense_repository,
            category_repository,
        }
    }

    fn validate(command: &RecordExpenseCommand) -> Result<()> {
        if command.category_id.trim().is_empty() {
            return Err(ExpenseValidationError::MissingCategory.into());
        }
        if !command.amount.is_finite() {
            return Err(ExpenseValidationError::NonFiniteAmount.into());
        }
        if command.amount <= 0.0 {
            return Err(ExpenseValidationError::NonPositiveAmount.into());
        }
        Ok(())
    }

    /// Record an expense and bump the referenced category's spent total.
    pub fn record_expense(&self, command: RecordExpenseCommand) -> Result<RecordExpenseResult> {
        info!(
            "Recording expense for {} {}: {:.2} on {}",
            command.user_id, command.month, command.amount, command.category_id
        );
        Self::validate(&command)?;

        // The store has no referential integrity; the existence check
        // happens here, before anything is written.
        if self
            .category_repository
            .get_category(&command.user_id, &command.category_id)?
            .is_none()
        {
            return Err(anyhow::anyhow!(
                "Category not found: {}",
                command.category_id
            ));
        }

        let now = Utc::now();
        let expense = Expense {
            id: Expense::generate_id(),
            user_id: command.user_id,
            month: command.month,
            category_id: command.category_id,
            amount: command.amount,
            note: command.note,
            date: command.date.unwrap_or(now),
            created_at: now,
        };
        self.expense_repository.store_expense(&expense)?;

        let updated = self.category_repository.increment_spent(
            &expense.user_id,
            &expense.category_id,
            expense.amount,
        )?;
        if !updated {
            // Category was deleted between the check and the increment; the
            // expense stands as an orphan.
            warn!(
                "Category {} vanished before spent update for expense {}",
                expense.category_id, expense.id
            );
        }

        Ok(RecordExpenseResult { expense })
    }

    /// Remove an expense and undo its spent contribution. The caller
    /// supplies the original amount captured before deletion.
    pub fn remove_expense(&self, command: RemoveExpenseCommand) -> Result<()> {
        info!(
            "Removing expense {} for {}",
            command.expense_id, command.user_id
        );

        let deleted = self
            .expense_repository
            .delete_expense(&command.user_id, &command.expense_id)?;
        if !deleted {
            warn!(
                "No expense {} found to remove for {}",
                command.expense_id, command.user_id
            );
            return Ok(());
        }

        let updated = self.category_repository.increment_spent(
            &command.user_id,
            &command.category_id,
            -command.amount,
        )?;
        if !updated {
            // Orphaned reference: the category is gone, its spent total is
            // lost. Accepted, not repaired.
            warn!(
                "Category {} no longer exists; skipped spent adjustment for removed expense {}",
                command.category_id, command.expense_id
            );
        }

        Ok(())
    }

    /// All expenses for a `(user, month)` pair, newest first.
    pub fn month_expenses(&self, user_id: &str, month: &MonthKey) -> Result<Vec<Expense>> {
        self.expense_repository.list_for_month(user_id, month)
    }

    /// All expenses referencing a category, most recent date first.
    pub fn category_expenses(&self, user_id: &str, category_id: &str) -> Result<Vec<Expense>> {
        self.expense_repository.list_for_category(user_id, category_id)
    }

    /// Sum of the month's expense amounts.
    pub fn total_month_expenses(&self, user_id: &str, month: &MonthKey) -> Result<f64> {
        let expenses = self.month_expenses(user_id, month)?;
        Ok(expenses.iter().map(|expense| expense.amount).sum())
    }

    /// The most recent `limit` expenses of the month.
    pub fn recent_expenses(
        &self,
        user_id: &str,
        month: &MonthKey,
        limit: usize,
    ) -> Result<Vec<Expense>> {
        let mut expenses = self.month_expenses(user_id, month)?;
        expenses.truncate(limit);
        Ok(expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category_service::CategoryService;
    use crate::domain::commands::categories::CreateCategoryCommand;
    use crate::domain::models::category::Category;
    use crate::storage::memory::MemoryConnection;

    struct Fixture {
        expense_service: ExpenseService<MemoryConnection>,
        category_service: CategoryService<MemoryConnection>,
    }

    fn setup() -> Fixture {
        let connection = Arc::new(MemoryConnection::new());
        Fixture {
            expense_service: ExpenseService::new(connection.clone()),
            category_service: CategoryService::new(connection),
        }
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn create_category(fixture: &Fixture, budgeted: f64) -> Category {
        fixture
            .category_service
            .create_category(CreateCategoryCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                name: "Food".to_string(),
                budgeted,
            })
            .unwrap()
            .category
    }

    fn record(fixture: &Fixture, category_id: &str, amount: f64) -> Expense {
        fixture
            .expense_service
            .record_expense(RecordExpenseCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                category_id: category_id.to_string(),
                amount,
                note: "test".to_string(),
                date: None,
            })
            .unwrap()
            .expense
    }

    fn spent(fixture: &Fixture, category_id: &str) -> f64 {
        fixture
            .category_service
            .month_categories("u1", &month("2026-02"))
            .unwrap()
            .into_iter()
            .find(|category| category.id == category_id)
            .unwrap()
            .spent
    }

    #[test]
    fn test_expense_round_trip_restores_spent() {
        let fixture = setup();
        let food = create_category(&fixture, 8000.0);

        let lunch = record(&fixture, &food.id, 350.0);
        assert_eq!(spent(&fixture, &food.id), 350.0);

        fixture
            .expense_service
            .remove_expense(RemoveExpenseCommand {
                user_id: "u1".to_string(),
                expense_id: lunch.id,
                category_id: food.id.clone(),
                amount: 350.0,
            })
            .unwrap();
        assert_eq!(spent(&fixture, &food.id), 0.0);
    }

    #[test]
    fn test_interleaved_creates_and_removes() {
        let fixture = setup();
        let food = create_category(&fixture, 1000.0);

        let a = record(&fixture, &food.id, 100.0);
        let _b = record(&fixture, &food.id, 200.0);
        fixture
            .expense_service
            .remove_expense(RemoveExpenseCommand {
                user_id: "u1".to_string(),
                expense_id: a.id,
                category_id: food.id.clone(),
                amount: 100.0,
            })
            .unwrap();
        let _c = record(&fixture, &food.id, 50.0);

        assert_eq!(spent(&fixture, &food.id), 250.0);
        assert_eq!(
            fixture
                .expense_service
                .total_month_expenses("u1", &month("2026-02"))
                .unwrap(),
            250.0
        );
    }

    #[test]
    fn test_overspending_is_permitted_and_behavior_unchanged() {
        let fixture = setup();
        let food = create_category(&fixture, 500.0);

        record(&fixture, &food.id, 400.0);
        record(&fixture, &food.id, 300.0);
        assert_eq!(spent(&fixture, &food.id), 700.0);

        // Already over budget; the next expense still goes through.
        record(&fixture, &food.id, 50.0);
        assert_eq!(spent(&fixture, &food.id), 750.0);
    }

    #[test]
    fn test_validation_happens_before_any_write() {
        let fixture = setup();
        let food = create_category(&fixture, 1000.0);

        for amount in [0.0, -5.0, f64::NAN] {
            assert!(fixture
                .expense_service
                .record_expense(RecordExpenseCommand {
                    user_id: "u1".to_string(),
                    month: month("2026-02"),
                    category_id: food.id.clone(),
                    amount,
                    note: String::new(),
                    date: None,
                })
                .is_err());
        }
        assert!(fixture
            .expense_service
            .record_expense(RecordExpenseCommand {
                user_id: "u1".to_string(),
                month: month("2026-02"),
                category_id: String::new(),
                amount: 10.0,
                note: String::new(),
                date: None,
            })
            .is_err());

        assert_eq!(spent(&fixture, &food.id), 0.0);
        assert!(fixture
            .expense_service
            .month_expenses("u1", &month("2026-02"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_recording_against_unknown_category_fails() {
        let fixture = setup();
        let result = fixture.expense_service.record_expense(RecordExpenseCommand {
            user_id: "u1".to_string(),
            month: month("2026-02"),
            category_id: "cat::missing".to_string(),
            amount: 10.0,
            note: String::new(),
            date: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_removal_tolerates_deleted_category() {
        let fixture = setup();
        let food = create_category(&fixture, 1000.0);
        let lunch = record(&fixture, &food.id, 100.0);

        fixture
            .category_service
            .delete_category("u1", &food.id)
            .unwrap();

        // The decrement target is gone; removal still succeeds.
        fixture
            .expense_service
            .remove_expense(RemoveExpenseCommand {
                user_id: "u1".to_string(),
                expense_id: lunch.id,
                category_id: food.id,
                amount: 100.0,
            })
            .unwrap();
    }

    #[test]
    fn test_removing_unknown_expense_is_a_no_op() {
        let fixture = setup();
        let food = create_category(&fixture, 1000.0);
        record(&fixture, &food.id, 100.0);

        fixture
            .expense_service
            .remove_expense(RemoveExpenseCommand {
                user_id: "u1".to_string(),
                expense_id: "exp::missing".to_string(),
                category_id: food.id.clone(),
                amount: 100.0,
            })
            .unwrap();

        // Spent is untouched because nothing was deleted.
        assert_eq!(spent(&fixture, &food.id), 100.0);
    }

    #[test]
    fn test_recent_expenses_limits_newest_first() {
        let fixture = setup();
        let food = create_category(&fixture, 1000.0);
        for amount in [10.0, 20.0, 30.0] {
            record(&fixture, &food.id, amount);
        }

        let recent = fixture
            .expense_service
            .recent_expenses("u1", &month("2026-02"), 2)
            .unwrap();
        assert_eq!(recent.len(), 2);
    }
}
