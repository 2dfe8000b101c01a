//! Domain-level command and query types
//!
//! These structs are used by services inside the domain layer. A host
//! application (HTTP handler, UI shell) is responsible for mapping its own
//! request types onto these before calling a service.

pub mod user {
    use crate::domain::models::user::UserMarker;

    /// Input for seeding a user's month marker at signup.
    #[derive(Debug, Clone)]
    pub struct InitializeUserCommand {
        pub user_id: String,
        pub email: String,
    }

    /// Result of seeding a user's month marker.
    #[derive(Debug, Clone)]
    pub struct InitializeUserResult {
        pub marker: UserMarker,
    }
}

pub mod income {
    use crate::domain::models::income::MonthlyIncome;
    use crate::domain::models::month::MonthKey;

    /// Input for setting the income figure of a month.
    #[derive(Debug, Clone)]
    pub struct SetMonthlyIncomeCommand {
        pub user_id: String,
        pub month: MonthKey,
        pub amount: f64,
    }

    /// Input for topping up the income figure of a month.
    #[derive(Debug, Clone)]
    pub struct AddToMonthlyIncomeCommand {
        pub user_id: String,
        pub month: MonthKey,
        pub amount: f64,
    }

    /// Result of either income mutation.
    #[derive(Debug, Clone)]
    pub struct IncomeResult {
        pub income: MonthlyIncome,
    }
}

pub mod rules {
    use crate::domain::models::rule::MandatoryRule;

    /// Input for creating a mandatory rule.
    #[derive(Debug, Clone)]
    pub struct CreateRuleCommand {
        pub user_id: String,
        pub name: String,
        pub amount: f64,
    }

    /// Input for updating a mandatory rule. `None` fields are left as-is.
    #[derive(Debug, Clone)]
    pub struct UpdateRuleCommand {
        pub user_id: String,
        pub rule_id: String,
        pub name: Option<String>,
        pub amount: Option<f64>,
        pub is_active: Option<bool>,
    }

    /// Result of a rule mutation.
    #[derive(Debug, Clone)]
    pub struct RuleResult {
        pub rule: MandatoryRule,
    }
}

pub mod categories {
    use crate::domain::models::category::Category;
    use crate::domain::models::month::MonthKey;

    /// Input for creating a category for a month.
    #[derive(Debug, Clone)]
    pub struct CreateCategoryCommand {
        pub user_id: String,
        pub month: MonthKey,
        pub name: String,
        pub budgeted: f64,
    }

    /// Input for editing a category's name and/or budget. Never touches the
    /// spent total.
    #[derive(Debug, Clone)]
    pub struct UpdateCategoryCommand {
        pub user_id: String,
        pub category_id: String,
        pub name: Option<String>,
        pub budgeted: Option<f64>,
    }

    /// Result of a category mutation.
    #[derive(Debug, Clone)]
    pub struct CategoryResult {
        pub category: Category,
    }

    /// Aggregate view over one month's categories.
    #[derive(Debug, Clone)]
    pub struct CategoryOverview {
        pub total_budgeted: f64,
        pub total_spent: f64,
        pub remaining: f64,
        pub categories: Vec<Category>,
    }
}

pub mod expenses {
    use chrono::{DateTime, Utc};

    use crate::domain::models::expense::Expense;
    use crate::domain::models::month::MonthKey;

    /// Input for recording an expense against a category.
    #[derive(Debug, Clone)]
    pub struct RecordExpenseCommand {
        pub user_id: String,
        pub month: MonthKey,
        pub category_id: String,
        pub amount: f64,
        pub note: String,
        /// Spend date; defaults to now when absent.
        pub date: Option<DateTime<Utc>>,
    }

    /// Input for removing an expense. The caller supplies the original
    /// amount and category; the engine does not re-read the expense for
    /// them.
    #[derive(Debug, Clone)]
    pub struct RemoveExpenseCommand {
        pub user_id: String,
        pub expense_id: String,
        pub category_id: String,
        pub amount: f64,
    }

    /// Result of recording an expense.
    #[derive(Debug, Clone)]
    pub struct RecordExpenseResult {
        pub expense: Expense,
    }
}

pub mod savings {
    use crate::domain::models::month::MonthKey;
    use crate::domain::models::savings::{SavingsEntry, SavingsSource};

    /// Input for appending a savings ledger entry.
    #[derive(Debug, Clone)]
    pub struct RecordSavingsCommand {
        pub user_id: String,
        pub month: MonthKey,
        pub amount: f64,
        pub source: SavingsSource,
    }

    /// Result of appending a savings ledger entry.
    #[derive(Debug, Clone)]
    pub struct RecordSavingsResult {
        pub entry: SavingsEntry,
    }

    /// Per-source partition of one month's savings.
    /// Invariant: `total == mandatory + leftover`.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SavingsBreakdown {
        pub mandatory: f64,
        pub leftover: f64,
        pub total: f64,
    }

    /// One row of the savings history: a month and its summed total.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MonthlySavingsTotal {
        pub month: MonthKey,
        pub total: f64,
    }
}

pub mod rollover {
    use crate::domain::models::month::MonthKey;

    /// What a rollover invocation actually did.
    #[derive(Debug, Clone, PartialEq)]
    pub enum RolloverOutcome {
        /// The marker advanced and mandatory savings were accrued.
        RolledOver {
            month: MonthKey,
            entries_created: usize,
        },
        /// The marker already pointed at the real current month.
        AlreadyCurrent { month: MonthKey },
        /// Another session advanced the marker first; accrual was skipped.
        LostRace { month: MonthKey },
    }
}
