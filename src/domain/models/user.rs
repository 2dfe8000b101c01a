//! Domain model for the per-user month marker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::month::MonthKey;

/// Per-user marker document. `current_month` is the single source of truth
/// for which month the user's dashboard operates in; it is written only at
/// signup and by the rollover engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMarker {
    pub id: String,
    pub email: String,
    pub current_month: MonthKey,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum UserValidationError {
    #[error("User id cannot be empty")]
    EmptyUserId,
    #[error("Email cannot be empty")]
    EmptyEmail,
    #[error("User is already initialized")]
    AlreadyInitialized,
}
