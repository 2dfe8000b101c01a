use anyhow::Result;

use super::connection::MemoryConnection;
use crate::domain::models::month::MonthKey;
use crate::domain::models::savings::SavingsEntry;
use crate::storage::traits::SavingsStorage;

/// In-memory savings ledger repository. Append-only: the trait exposes no
/// update or delete, and the backing store is a plain vector.
#[derive(Clone)]
pub struct SavingsRepository {
    connection: MemoryConnection,
}

impl SavingsRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl SavingsStorage for SavingsRepository {
    fn store_entry(&self, entry: &SavingsEntry) -> Result<()> {
        let mut savings = self.connection.store.savings.lock().unwrap();
        savings.push(entry.clone());
        Ok(())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<SavingsEntry>> {
        let savings = self.connection.store.savings.lock().unwrap();
        Ok(savings
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_for_month(&self, user_id: &str, month: &MonthKey) -> Result<Vec<SavingsEntry>> {
        let savings = self.connection.store.savings.lock().unwrap();
        Ok(savings
            .iter()
            .filter(|entry| entry.user_id == user_id && entry.month == *month)
            .cloned()
            .collect())
    }
}
