use anyhow::Result;

use super::connection::{JsonConnection, SAVINGS_FILE};
use crate::domain::models::month::MonthKey;
use crate::domain::models::savings::SavingsEntry;
use crate::storage::traits::SavingsStorage;

/// JSON-file savings ledger repository. The file only ever grows; there is
/// no code path that rewrites an existing entry.
#[derive(Clone)]
pub struct SavingsRepository {
    connection: JsonConnection,
}

impl SavingsRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl SavingsStorage for SavingsRepository {
    fn store_entry(&self, entry: &SavingsEntry) -> Result<()> {
        let _io = self.connection.lock_io();
        let mut entries: Vec<SavingsEntry> =
            self.connection.read_list(&entry.user_id, SAVINGS_FILE)?;
        entries.push(entry.clone());
        self.connection
            .write_file(&entry.user_id, SAVINGS_FILE, &entries)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<SavingsEntry>> {
        let _io = self.connection.lock_io();
        self.connection.read_list(user_id, SAVINGS_FILE)
    }

    fn list_for_month(&self, user_id: &str, month: &MonthKey) -> Result<Vec<SavingsEntry>> {
        let _io = self.connection.lock_io();
        let mut entries: Vec<SavingsEntry> = self.connection.read_list(user_id, SAVINGS_FILE)?;
        entries.retain(|entry| entry.month == *month);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::savings::SavingsSource;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup() -> (SavingsRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (SavingsRepository::new(connection), temp_dir)
    }

    fn entry(user_id: &str, month: &str, amount: f64, source: SavingsSource) -> SavingsEntry {
        SavingsEntry {
            id: SavingsEntry::generate_id(),
            user_id: user_id.to_string(),
            month: month.parse().unwrap(),
            amount,
            source,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_entries_accumulate_on_disk() {
        let (repo, _temp_dir) = setup();
        repo.store_entry(&entry("u1", "2026-01", 100.0, SavingsSource::Mandatory))
            .unwrap();
        repo.store_entry(&entry("u1", "2026-02", 200.0, SavingsSource::Mandatory))
            .unwrap();
        repo.store_entry(&entry("u1", "2026-02", 50.0, SavingsSource::Leftover))
            .unwrap();

        assert_eq!(repo.list_for_user("u1").unwrap().len(), 3);
        let feb: MonthKey = "2026-02".parse().unwrap();
        assert_eq!(repo.list_for_month("u1", &feb).unwrap().len(), 2);
    }
}
