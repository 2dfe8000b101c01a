//! # JSON Storage Module
//!
//! File-based storage backend. Each user gets a directory under the base
//! data directory, with one JSON document file per collection:
//!
//! ```text
//! data/
//! └── {user_id}/
//!     ├── user.json          user marker
//!     ├── income.json        monthly income records
//!     ├── rules.json         mandatory rules
//!     ├── categories.json    per-month categories
//!     ├── expenses.json      expenses
//!     └── savings.json       savings ledger (append-only)
//! ```
//!
//! Writes go through an atomic temp-file-then-rename pattern, and every
//! repository operation holds the connection-wide I/O lock for its whole
//! read-modify-write sequence, which is what makes `increment_spent`,
//! `set_current_month_if`, and the income upserts atomic relative to other
//! repositories on the same connection.

pub mod category_repository;
pub mod connection;
pub mod expense_repository;
pub mod income_repository;
pub mod rule_repository;
pub mod savings_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use connection::JsonConnection;
pub use expense_repository::ExpenseRepository;
pub use income_repository::IncomeRepository;
pub use rule_repository::RuleRepository;
pub use savings_repository::SavingsRepository;
pub use user_repository::UserMarkerRepository;
