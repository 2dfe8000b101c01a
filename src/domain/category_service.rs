//! Per-month category management.
//!
//! Categories are month-scoped envelopes: "Food" in March and "Food" in
//! April are independent records with independent budgets and spent
//! totals. This service never writes the spent field; that total moves
//! only through the expense ledger's relative increments.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::categories::{
    CategoryOverview, CategoryResult, CreateCategoryCommand, UpdateCategoryCommand,
};
use crate::domain::models::category::{Category, CategoryValidationError};
use crate::domain::models::month::MonthKey;
use crate::storage::traits::{CategoryStorage, Connection};

/// Service for managing spending categories
#[derive(Clone)]
pub struct CategoryService<C: Connection> {
    category_repository: C::CategoryRepository,
}

impl<C: Connection> CategoryService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let category_repository = connection.create_category_repository();
        Self { category_repository }
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName.into());
        }
        Ok(())
    }

    fn validate_budget(budgeted: f64) -> Result<()> {
        if !budgeted.is_finite() {
            return Err(CategoryValidationError::NonFiniteBudget.into());
        }
        if budgeted < 0.0 {
            return Err(CategoryValidationError::NegativeBudget.into());
        }
        Ok(())
    }

    /// Create a category for a month with a zero spent total.
    pub fn create_category(&self, command: CreateCategoryCommand) -> Result<CategoryResult> {
        info!(
            "Creating category for {} {}: {} ({:.2})",
            command.user_id, command.month, command.name, command.budgeted
        );
        Self::validate_name(&command.name)?;
        Self::validate_budget(command.budgeted)?;

        let category = Category {
            id: Category::generate_id(),
            user_id: command.user_id,
            month: command.month,
            name: command.name.trim().to_string(),
            budgeted: command.budgeted,
            spent: 0.0,
            created_at: Utc::now(),
        };
        self.category_repository.store_category(&category)?;

        Ok(CategoryResult { category })
    }

    /// Edit a category's name and/or budget. The spent total is untouched
    /// even when the budget shrinks below it.
    pub fn update_category(&self, command: UpdateCategoryCommand) -> Result<CategoryResult> {
        info!(
            "Updating category {} for {}",
            command.category_id, command.user_id
        );

        if let Some(ref name) = command.name {
            Self::validate_name(name)?;
        }
        if let Some(budgeted) = command.budgeted {
            Self::validate_budget(budgeted)?;
        }

        self.category_repository.update_details(
            &command.user_id,
            &command.category_id,
            command.name.as_deref().map(str::trim),
            command.budgeted,
        )?;

        let category = self
            .category_repository
            .get_category(&command.user_id, &command.category_id)?
            .ok_or_else(|| anyhow::anyhow!("Category not found: {}", command.category_id))?;

        Ok(CategoryResult { category })
    }

    /// Delete a category. Expenses that referenced it are left in place;
    /// their spent contribution is simply lost with the record.
    pub fn delete_category(&self, user_id: &str, category_id: &str) -> Result<bool> {
        let deleted = self.category_repository.delete_category(user_id, category_id)?;
        if deleted {
            info!("Deleted category {} for {}", category_id, user_id);
        } else {
            warn!("No category {} found to delete for {}", category_id, user_id);
        }
        Ok(deleted)
    }

    /// All categories for a `(user, month)` pair.
    pub fn month_categories(&self, user_id: &str, month: &MonthKey) -> Result<Vec<Category>> {
        self.category_repository.list_for_month(user_id, month)
    }

    /// Aggregate totals across one month's categories.
    pub fn category_overview(&self, user_id: &str, month: &MonthKey) -> Result<CategoryOverview> {
        let categories = self.month_categories(user_id, month)?;
        let total_budgeted: f64 = categories.iter().map(|category| category.budgeted).sum();
        let total_spent: f64 = categories.iter().map(|category| category.spent).sum();
        Ok(CategoryOverview {
            total_budgeted,
            total_spent,
            remaining: total_budgeted - total_spent,
            categories,
        })
    }
}
