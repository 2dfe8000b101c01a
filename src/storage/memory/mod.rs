//! # In-Memory Storage Module
//!
//! Thread-safe in-memory storage backend. Primarily used by tests and
//! development setups; it implements the same storage traits as the
//! file-backed implementation, which is what makes the domain layer
//! storage-agnostic in practice.
//!
//! Every collection is a locked map owned by the connection, so the atomic
//! primitives (`increment_spent`, `set_current_month_if`, income upserts)
//! are atomic by construction: they run under the collection lock.

pub mod category_repository;
pub mod connection;
pub mod expense_repository;
pub mod income_repository;
pub mod rule_repository;
pub mod savings_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use connection::MemoryConnection;
pub use expense_repository::ExpenseRepository;
pub use income_repository::IncomeRepository;
pub use rule_repository::RuleRepository;
pub use savings_repository::SavingsRepository;
pub use user_repository::UserMarkerRepository;
