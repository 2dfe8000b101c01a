use anyhow::Result;
use chrono::Utc;

use super::connection::{JsonConnection, INCOME_FILE};
use crate::domain::models::income::MonthlyIncome;
use crate::domain::models::month::MonthKey;
use crate::storage::traits::IncomeStorage;

/// JSON-file monthly income repository. Records live in one list per user;
/// the `(user, month)` uniqueness invariant is maintained by resolving both
/// upserts against the month under the I/O lock.
#[derive(Clone)]
pub struct IncomeRepository {
    connection: JsonConnection,
}

impl IncomeRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn upsert_with<F>(&self, user_id: &str, month: &MonthKey, apply: F) -> Result<MonthlyIncome>
    where
        F: FnOnce(Option<f64>) -> f64,
    {
        let _io = self.connection.lock_io();
        let mut records: Vec<MonthlyIncome> = self.connection.read_list(user_id, INCOME_FILE)?;

        let record = match records.iter_mut().find(|record| record.month == *month) {
            Some(existing) => {
                existing.amount = apply(Some(existing.amount));
                existing.locked_at = Utc::now();
                existing.clone()
            }
            None => {
                let created = MonthlyIncome {
                    id: MonthlyIncome::generate_id(),
                    user_id: user_id.to_string(),
                    month: *month,
                    amount: apply(None),
                    locked_at: Utc::now(),
                };
                records.push(created.clone());
                created
            }
        };

        self.connection.write_file(user_id, INCOME_FILE, &records)?;
        Ok(record)
    }
}

impl IncomeStorage for IncomeRepository {
    fn get_income(&self, user_id: &str, month: &MonthKey) -> Result<Option<MonthlyIncome>> {
        let _io = self.connection.lock_io();
        let records: Vec<MonthlyIncome> = self.connection.read_list(user_id, INCOME_FILE)?;
        Ok(records.into_iter().find(|record| record.month == *month))
    }

    fn upsert_set(&self, user_id: &str, month: &MonthKey, amount: f64) -> Result<MonthlyIncome> {
        self.upsert_with(user_id, month, |_| amount)
    }

    fn upsert_add(&self, user_id: &str, month: &MonthKey, delta: f64) -> Result<MonthlyIncome> {
        self.upsert_with(user_id, month, |existing| existing.unwrap_or(0.0) + delta)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<MonthlyIncome>> {
        let _io = self.connection.lock_io();
        self.connection.read_list(user_id, INCOME_FILE)
    }
}
