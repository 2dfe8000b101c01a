use anyhow::Result;
use log::debug;

use super::connection::{JsonConnection, MARKER_FILE};
use crate::domain::models::month::MonthKey;
use crate::domain::models::user::UserMarker;
use crate::storage::traits::UserMarkerStorage;

/// JSON-file user marker repository. The marker is a single document per
/// user directory.
#[derive(Clone)]
pub struct UserMarkerRepository {
    connection: JsonConnection,
}

impl UserMarkerRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl UserMarkerStorage for UserMarkerRepository {
    fn store_marker(&self, marker: &UserMarker) -> Result<()> {
        let _io = self.connection.lock_io();
        self.connection.write_file(&marker.id, MARKER_FILE, marker)
    }

    fn get_marker(&self, user_id: &str) -> Result<Option<UserMarker>> {
        let _io = self.connection.lock_io();
        self.connection.read_file(user_id, MARKER_FILE)
    }

    fn set_current_month_if(
        &self,
        user_id: &str,
        expected: &MonthKey,
        new: &MonthKey,
    ) -> Result<bool> {
        // The whole compare-and-swap runs under the I/O lock.
        let _io = self.connection.lock_io();
        let marker: Option<UserMarker> = self.connection.read_file(user_id, MARKER_FILE)?;
        match marker {
            Some(mut marker) if marker.current_month == *expected => {
                marker.current_month = *new;
                self.connection.write_file(user_id, MARKER_FILE, &marker)?;
                Ok(true)
            }
            Some(marker) => {
                debug!(
                    "Conditional month update for {} refused: stored {} != expected {}",
                    user_id, marker.current_month, expected
                );
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup() -> (UserMarkerRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (UserMarkerRepository::new(connection), temp_dir)
    }

    fn marker(user_id: &str, month: &str) -> UserMarker {
        UserMarker {
            id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            current_month: month.parse().unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_marker_survives_round_trip() {
        let (repo, _temp_dir) = setup();
        let original = marker("u1", "2026-01");
        repo.store_marker(&original).unwrap();

        let stored = repo.get_marker("u1").unwrap().unwrap();
        assert_eq!(stored, original);
    }

    #[test]
    fn test_conditional_update_against_file() {
        let (repo, _temp_dir) = setup();
        repo.store_marker(&marker("u1", "2026-01")).unwrap();

        let jan: MonthKey = "2026-01".parse().unwrap();
        let feb: MonthKey = "2026-02".parse().unwrap();

        assert!(repo.set_current_month_if("u1", &jan, &feb).unwrap());
        // Second attempt with the stale expectation loses.
        assert!(!repo.set_current_month_if("u1", &jan, &feb).unwrap());
        assert_eq!(repo.get_marker("u1").unwrap().unwrap().current_month, feb);
    }
}
