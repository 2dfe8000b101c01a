use anyhow::Result;
use chrono::Utc;

use super::connection::MemoryConnection;
use crate::domain::models::income::MonthlyIncome;
use crate::domain::models::month::MonthKey;
use crate::storage::traits::IncomeStorage;

/// In-memory monthly income repository.
///
/// The map is keyed on `(user_id, month)`, so duplicate records for a pair
/// cannot exist and both upserts resolve under a single lock acquisition.
#[derive(Clone)]
pub struct IncomeRepository {
    connection: MemoryConnection,
}

impl IncomeRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl IncomeStorage for IncomeRepository {
    fn get_income(&self, user_id: &str, month: &MonthKey) -> Result<Option<MonthlyIncome>> {
        let income = self.connection.store.income.lock().unwrap();
        Ok(income.get(&(user_id.to_string(), *month)).cloned())
    }

    fn upsert_set(&self, user_id: &str, month: &MonthKey, amount: f64) -> Result<MonthlyIncome> {
        let mut income = self.connection.store.income.lock().unwrap();
        let key = (user_id.to_string(), *month);
        let record = income
            .entry(key)
            .and_modify(|existing| {
                existing.amount = amount;
                existing.locked_at = Utc::now();
            })
            .or_insert_with(|| MonthlyIncome {
                id: MonthlyIncome::generate_id(),
                user_id: user_id.to_string(),
                month: *month,
                amount,
                locked_at: Utc::now(),
            });
        Ok(record.clone())
    }

    fn upsert_add(&self, user_id: &str, month: &MonthKey, delta: f64) -> Result<MonthlyIncome> {
        let mut income = self.connection.store.income.lock().unwrap();
        let key = (user_id.to_string(), *month);
        let record = income
            .entry(key)
            .and_modify(|existing| {
                existing.amount += delta;
                existing.locked_at = Utc::now();
            })
            .or_insert_with(|| MonthlyIncome {
                id: MonthlyIncome::generate_id(),
                user_id: user_id.to_string(),
                month: *month,
                amount: delta,
                locked_at: Utc::now(),
            });
        Ok(record.clone())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<MonthlyIncome>> {
        let income = self.connection.store.income.lock().unwrap();
        Ok(income
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }
}
