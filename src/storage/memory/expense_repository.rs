use anyhow::Result;

use super::connection::MemoryConnection;
use crate::domain::models::expense::Expense;
use crate::domain::models::month::MonthKey;
use crate::storage::traits::ExpenseStorage;

/// In-memory expense repository
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: MemoryConnection,
}

impl ExpenseRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn store_expense(&self, expense: &Expense) -> Result<()> {
        let mut expenses = self.connection.store.expenses.lock().unwrap();
        expenses.insert(expense.id.clone(), expense.clone());
        Ok(())
    }

    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Option<Expense>> {
        let expenses = self.connection.store.expenses.lock().unwrap();
        Ok(expenses
            .get(expense_id)
            .filter(|expense| expense.user_id == user_id)
            .cloned())
    }

    fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool> {
        let mut expenses = self.connection.store.expenses.lock().unwrap();
        let owned = expenses
            .get(expense_id)
            .map(|expense| expense.user_id == user_id)
            .unwrap_or(false);
        if owned {
            expenses.remove(expense_id);
        }
        Ok(owned)
    }

    fn list_for_month(&self, user_id: &str, month: &MonthKey) -> Result<Vec<Expense>> {
        let expenses = self.connection.store.expenses.lock().unwrap();
        let mut result: Vec<Expense> = expenses
            .values()
            .filter(|expense| expense.user_id == user_id && expense.month == *month)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn list_for_category(&self, user_id: &str, category_id: &str) -> Result<Vec<Expense>> {
        let expenses = self.connection.store.expenses.lock().unwrap();
        let mut result: Vec<Expense> = expenses
            .values()
            .filter(|expense| expense.user_id == user_id && expense.category_id == category_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(result)
    }
}
