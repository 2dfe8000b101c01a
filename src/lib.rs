//! # Budget Tracker Core
//!
//! Month rollover and savings accounting engine for a personal budget
//! tracker. The domain services cover monthly income, mandatory deduction
//! rules, per-month category budgets, expenses, and an append-only savings
//! ledger; the rollover engine advances a user's active month exactly once
//! per calendar boundary and accrues mandatory savings for the new month.
//!
//! Storage is abstracted behind the traits in [`storage::traits`]; the
//! crate ships an in-memory backend and a JSON-file backend, and a host
//! application can plug in its own by implementing
//! [`storage::traits::Connection`].
//!
//! The typical session-start flow:
//!
//! ```
//! use std::sync::Arc;
//! use budget_tracker_core::storage::MemoryConnection;
//! use budget_tracker_core::Backend;
//! use budget_tracker_core::domain::commands::user::InitializeUserCommand;
//!
//! # fn main() -> anyhow::Result<()> {
//! let backend = Backend::new(Arc::new(MemoryConnection::new()));
//! backend.user_service.initialize_user(InitializeUserCommand {
//!     user_id: "u1".to_string(),
//!     email: "u1@example.com".to_string(),
//! })?;
//!
//! if backend.rollover_service.needs_rollover("u1") {
//!     backend.rollover_service.perform_rollover("u1")?;
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod domain;
pub mod storage;

use crate::domain::{
    CategoryService, ExpenseService, IncomeService, RolloverService, RulesService, SavingsService,
    UserService,
};
use crate::storage::traits::Connection;

/// Main backend struct that orchestrates all services
#[derive(Clone)]
pub struct Backend<C: Connection> {
    pub user_service: UserService<C>,
    pub income_service: IncomeService<C>,
    pub rules_service: RulesService<C>,
    pub category_service: CategoryService<C>,
    pub expense_service: ExpenseService<C>,
    pub savings_service: SavingsService<C>,
    pub rollover_service: RolloverService<C>,
}

impl<C: Connection> Backend<C> {
    /// Create a backend with all services sharing one connection.
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            user_service: UserService::new(connection.clone()),
            income_service: IncomeService::new(connection.clone()),
            rules_service: RulesService::new(connection.clone()),
            category_service: CategoryService::new(connection.clone()),
            expense_service: ExpenseService::new(connection.clone()),
            savings_service: SavingsService::new(connection.clone()),
            rollover_service: RolloverService::new(connection),
        }
    }
}
