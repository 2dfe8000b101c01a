//! # Domain Module
//!
//! Contains all business logic for the budget tracker engine.
//!
//! This module encapsulates the core rules, entities, and services that
//! define how income, mandatory deductions, category budgets, expenses,
//! and savings are modeled and how a user's financial state transitions
//! from one calendar month to the next. It operates independently of any
//! UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **user_service**: seeding and reading the per-user month marker
//! - **income_service**: monthly income set / top-up / history
//! - **rules_service**: mandatory deduction rule management
//! - **category_service**: per-month spending envelope management
//! - **expense_service**: expense recording with spent-total maintenance
//! - **savings_service**: append-only savings ledger accounting
//! - **rollover_service**: the month rollover engine
//!
//! ## Core Concepts
//!
//! - **Month marker**: the stored `YYYY-MM` a user's dashboard operates in
//! - **Mandatory rule**: a recurring fixed deduction applied every month
//! - **Category**: a per-month envelope with a budget and a spent total
//! - **Rollover**: the once-per-calendar-month transition that advances the
//!   marker and accrues mandatory savings for the new month

pub mod category_service;
pub mod commands;
pub mod expense_service;
pub mod income_service;
pub mod models;
pub mod rollover_service;
pub mod rules_service;
pub mod savings_service;
pub mod user_service;

pub use category_service::CategoryService;
pub use expense_service::ExpenseService;
pub use income_service::IncomeService;
pub use rollover_service::RolloverService;
pub use rules_service::RulesService;
pub use savings_service::SavingsService;
pub use user_service::UserService;
