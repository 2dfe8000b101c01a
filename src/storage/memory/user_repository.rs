use anyhow::Result;
use log::debug;

use super::connection::MemoryConnection;
use crate::domain::models::month::MonthKey;
use crate::domain::models::user::UserMarker;
use crate::storage::traits::UserMarkerStorage;

/// In-memory user marker repository
#[derive(Clone)]
pub struct UserMarkerRepository {
    connection: MemoryConnection,
}

impl UserMarkerRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl UserMarkerStorage for UserMarkerRepository {
    fn store_marker(&self, marker: &UserMarker) -> Result<()> {
        let mut markers = self.connection.store.markers.lock().unwrap();
        markers.insert(marker.id.clone(), marker.clone());
        Ok(())
    }

    fn get_marker(&self, user_id: &str) -> Result<Option<UserMarker>> {
        let markers = self.connection.store.markers.lock().unwrap();
        Ok(markers.get(user_id).cloned())
    }

    fn set_current_month_if(
        &self,
        user_id: &str,
        expected: &MonthKey,
        new: &MonthKey,
    ) -> Result<bool> {
        let mut markers = self.connection.store.markers.lock().unwrap();
        match markers.get_mut(user_id) {
            Some(marker) if marker.current_month == *expected => {
                marker.current_month = *new;
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

    fn marker(user_id: &str, month: &str) -> UserMarker {
        UserMarker {
            id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            current_month: month.parse().unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_store_and_get_marker() {
        let repo = UserMarkerRepository::new(MemoryConnection::new());
        assert!(repo.get_marker("u1").unwrap().is_none());

        repo.store_marker(&marker("u1", "2026-01")).unwrap();
        let stored = repo.get_marker("u1").unwrap().unwrap();
        assert_eq!(stored.current_month, "2026-01".parse().unwrap());
    }

    #[test]
    fn test_conditional_update_succeeds_when_expectation_holds() {
        let repo = UserMarkerRepository::new(MemoryConnection::new());
        repo.store_marker(&marker("u1", "2026-01")).unwrap();

        let moved = repo
            .set_current_month_if(
                "u1",
                &"2026-01".parse().unwrap(),
                &"2026-02".parse().unwrap(),
            )
            .unwrap();
        assert!(moved);
        let stored = repo.get_marker("u1").unwrap().unwrap();
        assert_eq!(stored.current_month, "2026-02".parse().unwrap());
    }

    #[test]
    fn test_conditional_update_refuses_stale_expectation() {
        let repo = UserMarkerRepository::new(MemoryConnection::new());
        repo.store_marker(&marker("u1", "2026-02")).unwrap();

        // A second session still expecting January must lose.
        let moved = repo
            .set_current_month_if(
                "u1",
                &"2026-01".parse().unwrap(),
                &"2026-02".parse().unwrap(),
            )
            .unwrap();
        assert!(!moved);
        let stored = repo.get_marker("u1").unwrap().unwrap();
        assert_eq!(stored.current_month, "2026-02".parse().unwrap());
    }

    #[test]
    fn test_conditional_update_on_missing_marker() {
        let repo = UserMarkerRepository::new(MemoryConnection::new());
        let moved = repo
            .set_current_month_if(
                "ghost",
                &"2026-01".parse().unwrap(),
                &"2026-02".parse().unwrap(),
            )
            .unwrap();
        assert!(!moved);
    }
}
