//! User marker management.
//!
//! The marker's `current_month` field is the single source of truth for
//! which month a user's dashboard operates in. This service only seeds and
//! reads it; advancing it is the rollover engine's job.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use crate::domain::commands::user::{InitializeUserCommand, InitializeUserResult};
use crate::domain::models::month::MonthKey;
use crate::domain::models::user::{UserMarker, UserValidationError};
use crate::storage::traits::{Connection, UserMarkerStorage};

/// Service for seeding and reading per-user month markers
#[derive(Clone)]
pub struct UserService<C: Connection> {
    marker_repository: C::UserMarkerRepository,
}

impl<C: Connection> UserService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let marker_repository = connection.create_user_marker_repository();
        Self { marker_repository }
    }

    /// Stamp the user marker with the real current month for the first time.
    /// This is an onboarding seed, not a rollover; re-initializing an
    /// existing user is rejected.
    pub fn initialize_user(&self, command: InitializeUserCommand) -> Result<InitializeUserResult> {
        info!("Initializing user marker: {}", command.user_id);

        if command.user_id.trim().is_empty() {
            return Err(UserValidationError::EmptyUserId.into());
        }
        if command.email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail.into());
        }
        if self.marker_repository.get_marker(&command.user_id)?.is_some() {
            return Err(UserValidationError::AlreadyInitialized.into());
        }

        let marker = UserMarker {
            id: command.user_id,
            email: command.email,
            current_month: MonthKey::current(),
            created_at: Utc::now(),
        };
        self.marker_repository.store_marker(&marker)?;

        info!(
            "Initialized user {} at month {}",
            marker.id, marker.current_month
        );

        Ok(InitializeUserResult { marker })
    }

    /// The user's stored current month, or None for an unknown user.
    pub fn user_current_month(&self, user_id: &str) -> Result<Option<MonthKey>> {
        debug!("Reading current month for user {}", user_id);
        let marker = self.marker_repository.get_marker(user_id)?;
        Ok(marker.map(|marker| marker.current_month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryConnection;

    fn setup() -> UserService<MemoryConnection> {
        UserService::new(Arc::new(MemoryConnection::new()))
    }

    fn init_command(user_id: &str) -> InitializeUserCommand {
        InitializeUserCommand {
            user_id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
        }
    }

    #[test]
    fn test_initialize_stamps_real_current_month() {
        let service = setup();
        let result = service.initialize_user(init_command("u1")).unwrap();
        assert_eq!(result.marker.current_month, MonthKey::current());

        let stored = service.user_current_month("u1").unwrap();
        assert_eq!(stored, Some(MonthKey::current()));
    }

    #[test]
    fn test_double_initialization_is_rejected() {
        let service = setup();
        service.initialize_user(init_command("u1")).unwrap();

        let result = service.initialize_user(init_command("u1"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("already initialized"));
    }

    #[test]
    fn test_empty_identifiers_are_rejected() {
        let service = setup();
        assert!(service
            .initialize_user(InitializeUserCommand {
                user_id: "  ".to_string(),
                email: "a@example.com".to_string(),
            })
            .is_err());
        assert!(service
            .initialize_user(InitializeUserCommand {
                user_id: "u1".to_string(),
                email: "".to_string(),
            })
            .is_err());
    }

    #[test]
    fn test_unknown_user_has_no_month() {
        let service = setup();
        assert_eq!(service.user_current_month("ghost").unwrap(), None);
    }
}
