use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::models::category::Category;
use crate::domain::models::expense::Expense;
use crate::domain::models::income::MonthlyIncome;
use crate::domain::models::month::MonthKey;
use crate::domain::models::rule::MandatoryRule;
use crate::domain::models::savings::SavingsEntry;
use crate::domain::models::user::UserMarker;
use crate::storage::traits::Connection;

/// Shared state behind a [`MemoryConnection`]. One locked map per
/// collection; the savings ledger is a plain vector because it is
/// append-only.
#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) markers: Mutex<HashMap<String, UserMarker>>,
    pub(super) income: Mutex<HashMap<(String, MonthKey), MonthlyIncome>>,
    pub(super) rules: Mutex<HashMap<String, MandatoryRule>>,
    pub(super) categories: Mutex<HashMap<String, Category>>,
    pub(super) expenses: Mutex<HashMap<String, Expense>>,
    pub(super) savings: Mutex<Vec<SavingsEntry>>,
}

/// In-memory connection. Cloning shares the underlying collections, so all
/// repositories created from clones of one connection see the same data.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    pub(super) store: Arc<MemoryStore>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Connection for MemoryConnection {
    type UserMarkerRepository = super::user_repository::UserMarkerRepository;
    type IncomeRepository = super::income_repository::IncomeRepository;
    type MandatoryRuleRepository = super::rule_repository::RuleRepository;
    type CategoryRepository = super::category_repository::CategoryRepository;
    type ExpenseRepository = super::expense_repository::ExpenseRepository;
    type SavingsRepository = super::savings_repository::SavingsRepository;

    fn create_user_marker_repository(&self) -> Self::UserMarkerRepository {
        super::user_repository::UserMarkerRepository::new(self.clone())
    }

    fn create_income_repository(&self) -> Self::IncomeRepository {
        super::income_repository::IncomeRepository::new(self.clone())
    }

    fn create_mandatory_rule_repository(&self) -> Self::MandatoryRuleRepository {
        super::rule_repository::RuleRepository::new(self.clone())
    }

    fn create_category_repository(&self) -> Self::CategoryRepository {
        super::category_repository::CategoryRepository::new(self.clone())
    }

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        super::expense_repository::ExpenseRepository::new(self.clone())
    }

    fn create_savings_repository(&self) -> Self::SavingsRepository {
        super::savings_repository::SavingsRepository::new(self.clone())
    }
}
