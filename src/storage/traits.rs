//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! The backing store is modeled as a set of per-entity document collections
//! supporting lookups, equality-filtered listings, and atomic single-document
//! writes. Two primitives go beyond plain CRUD and are load-bearing for the
//! engine's invariants:
//!
//! - [`CategoryStorage::increment_spent`] is a commutative relative add, so
//!   concurrent expense mutations on one category never lose an update;
//! - [`UserMarkerStorage::set_current_month_if`] is a conditional write that
//!   only succeeds while the stored month still matches the caller's
//!   expectation, which serializes concurrent rollovers per user.

use anyhow::Result;

use crate::domain::models::category::Category;
use crate::domain::models::expense::Expense;
use crate::domain::models::income::MonthlyIncome;
use crate::domain::models::month::MonthKey;
use crate::domain::models::rule::MandatoryRule;
use crate::domain::models::savings::SavingsEntry;
use crate::domain::models::user::UserMarker;

/// Trait defining the interface for user marker storage operations
pub trait UserMarkerStorage: Send + Sync {
    /// Store a new user marker
    fn store_marker(&self, marker: &UserMarker) -> Result<()>;

    /// Retrieve a user marker by user ID
    fn get_marker(&self, user_id: &str) -> Result<Option<UserMarker>>;

    /// Conditionally advance the marker's current month.
    ///
    /// The write succeeds only if the stored month still equals `expected`.
    /// Returns false (without modifying anything) when another actor already
    /// moved the marker, or when the marker does not exist.
    fn set_current_month_if(
        &self,
        user_id: &str,
        expected: &MonthKey,
        new: &MonthKey,
    ) -> Result<bool>;
}

/// Trait defining the interface for monthly income storage operations
///
/// The collection is keyed on `(user_id, month)`, which is what enforces the
/// at-most-one-record-per-pair invariant: both upserts target that key.
pub trait IncomeStorage: Send + Sync {
    /// Retrieve the income record for a `(user, month)` pair
    fn get_income(&self, user_id: &str, month: &MonthKey) -> Result<Option<MonthlyIncome>>;

    /// Set the income amount for a `(user, month)` pair, creating the record
    /// if absent. Returns the stored record.
    fn upsert_set(&self, user_id: &str, month: &MonthKey, amount: f64) -> Result<MonthlyIncome>;

    /// Add to the income amount for a `(user, month)` pair, creating the
    /// record with `delta` if absent. The add is atomic relative to
    /// concurrent upserts on the same pair. Returns the stored record.
    fn upsert_add(&self, user_id: &str, month: &MonthKey, delta: f64) -> Result<MonthlyIncome>;

    /// List all income records for a user
    fn list_for_user(&self, user_id: &str) -> Result<Vec<MonthlyIncome>>;
}

/// Trait defining the interface for mandatory rule storage operations
pub trait MandatoryRuleStorage: Send + Sync {
    /// Store a new rule
    fn store_rule(&self, rule: &MandatoryRule) -> Result<()>;

    /// Retrieve a specific rule by ID
    fn get_rule(&self, user_id: &str, rule_id: &str) -> Result<Option<MandatoryRule>>;

    /// Replace an existing rule
    fn update_rule(&self, rule: &MandatoryRule) -> Result<()>;

    /// Delete a rule. Returns true if the rule was found and deleted.
    fn delete_rule(&self, user_id: &str, rule_id: &str) -> Result<bool>;

    /// List all rules for a user, active or not
    fn list_rules(&self, user_id: &str) -> Result<Vec<MandatoryRule>>;

    /// List only the active rules for a user
    fn list_active_rules(&self, user_id: &str) -> Result<Vec<MandatoryRule>>;
}

/// Trait defining the interface for category storage operations
pub trait CategoryStorage: Send + Sync {
    /// Store a new category
    fn store_category(&self, category: &Category) -> Result<()>;

    /// Retrieve a specific category by ID
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>>;

    /// List all categories for a `(user, month)` pair
    fn list_for_month(&self, user_id: &str, month: &MonthKey) -> Result<Vec<Category>>;

    /// Update a category's name and/or budget. `spent` is deliberately not
    /// reachable through this method: it moves only via `increment_spent`.
    fn update_details(
        &self,
        user_id: &str,
        category_id: &str,
        name: Option<&str>,
        budgeted: Option<f64>,
    ) -> Result<()>;

    /// Add `delta` (possibly negative) to a category's spent total.
    ///
    /// Must be atomic relative to concurrent increments on the same
    /// category. Returns false when the category does not exist.
    fn increment_spent(&self, user_id: &str, category_id: &str, delta: f64) -> Result<bool>;

    /// Delete a category. Returns true if the category was found and deleted.
    fn delete_category(&self, user_id: &str, category_id: &str) -> Result<bool>;
}

/// Trait defining the interface for expense storage operations
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense
    fn store_expense(&self, expense: &Expense) -> Result<()>;

    /// Retrieve a specific expense by ID
    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Option<Expense>>;

    /// Delete an expense. Returns true if the expense was found and deleted.
    fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool>;

    /// List all expenses for a `(user, month)` pair, newest first
    fn list_for_month(&self, user_id: &str, month: &MonthKey) -> Result<Vec<Expense>>;

    /// List all expenses referencing a category, most recent date first
    fn list_for_category(&self, user_id: &str, category_id: &str) -> Result<Vec<Expense>>;
}

/// Trait defining the interface for savings ledger storage operations
///
/// The ledger is append-only by contract: there is no update or delete.
pub trait SavingsStorage: Send + Sync {
    /// Append a savings entry
    fn store_entry(&self, entry: &SavingsEntry) -> Result<()>;

    /// List all entries for a user across all months
    fn list_for_user(&self, user_id: &str) -> Result<Vec<SavingsEntry>>;

    /// List the entries for a `(user, month)` pair
    fn list_for_month(&self, user_id: &str, month: &MonthKey) -> Result<Vec<SavingsEntry>>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories, so the domain layer can work
/// with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    type UserMarkerRepository: UserMarkerStorage + Clone;
    type IncomeRepository: IncomeStorage + Clone;
    type MandatoryRuleRepository: MandatoryRuleStorage + Clone;
    type CategoryRepository: CategoryStorage + Clone;
    type ExpenseRepository: ExpenseStorage + Clone;
    type SavingsRepository: SavingsStorage + Clone;

    fn create_user_marker_repository(&self) -> Self::UserMarkerRepository;
    fn create_income_repository(&self) -> Self::IncomeRepository;
    fn create_mandatory_rule_repository(&self) -> Self::MandatoryRuleRepository;
    fn create_category_repository(&self) -> Self::CategoryRepository;
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
    fn create_savings_repository(&self) -> Self::SavingsRepository;
}
