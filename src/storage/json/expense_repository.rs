use anyhow::Result;

use super::connection::{JsonConnection, EXPENSES_FILE};
use crate::domain::models::expense::Expense;
use crate::domain::models::month::MonthKey;
use crate::storage::traits::ExpenseStorage;

/// JSON-file expense repository
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: JsonConnection,
}

impl ExpenseRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn store_expense(&self, expense: &Expense) -> Result<()> {
        let _io = self.connection.lock_io();
        let mut expenses: Vec<Expense> =
            self.connection.read_list(&expense.user_id, EXPENSES_FILE)?;
        expenses.push(expense.clone());
        self.connection
            .write_file(&expense.user_id, EXPENSES_FILE, &expenses)
    }

    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Option<Expense>> {
        let _io = self.connection.lock_io();
        let expenses: Vec<Expense> = self.connection.read_list(user_id, EXPENSES_FILE)?;
        Ok(expenses.into_iter().find(|expense| expense.id == expense_id))
    }

    fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool> {
        let _io = self.connection.lock_io();
        let mut expenses: Vec<Expense> = self.connection.read_list(user_id, EXPENSES_FILE)?;
        let before = expenses.len();
        expenses.retain(|expense| expense.id != expense_id);
        if expenses.len() == before {
            return Ok(false);
        }
        self.connection
            .write_file(user_id, EXPENSES_FILE, &expenses)?;
        Ok(true)
    }

    fn list_for_month(&self, user_id: &str, month: &MonthKey) -> Result<Vec<Expense>> {
        let _io = self.connection.lock_io();
        let mut expenses: Vec<Expense> = self.connection.read_list(user_id, EXPENSES_FILE)?;
        expenses.retain(|expense| expense.month == *month);
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(expenses)
    }

    fn list_for_category(&self, user_id: &str, category_id: &str) -> Result<Vec<Expense>> {
        let _io = self.connection.lock_io();
        let mut expenses: Vec<Expense> = self.connection.read_list(user_id, EXPENSES_FILE)?;
        expenses.retain(|expense| expense.category_id == category_id);
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup() -> (ExpenseRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (ExpenseRepository::new(connection), temp_dir)
    }

    fn expense(user_id: &str, month: &str, category_id: &str, amount: f64) -> Expense {
        Expense {
            id: Expense::generate_id(),
            user_id: user_id.to_string(),
            month: month.parse().unwrap(),
            category_id: category_id.to_string(),
            amount,
            note: "test".to_string(),
            date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_store_list_delete() {
        let (repo, _temp_dir) = setup();
        let coffee = expense("u1", "2026-02", "cat::1", 120.0);
        let lunch = expense("u1", "2026-02", "cat::2", 350.0);
        repo.store_expense(&coffee).unwrap();
        repo.store_expense(&lunch).unwrap();

        let feb: MonthKey = "2026-02".parse().unwrap();
        assert_eq!(repo.list_for_month("u1", &feb).unwrap().len(), 2);
        assert_eq!(repo.list_for_category("u1", "cat::1").unwrap().len(), 1);

        assert!(repo.delete_expense("u1", &coffee.id).unwrap());
        assert_eq!(repo.list_for_month("u1", &feb).unwrap().len(), 1);
    }
}
