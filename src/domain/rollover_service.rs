//! Month rollover engine.
//!
//! Detects that the wall clock has moved past a user's stored current
//! month and performs the transition exactly once per calendar boundary:
//! advance the marker, then accrue one mandatory savings entry per active
//! rule for the new month.
//!
//! Idempotence rests on two layers. The trigger discipline: the check only
//! fires while the stored month differs from the real one, and the marker
//! is advanced before any accrual runs. And the conditional marker write:
//! when two sessions race past the check together, only the one whose
//! expectation still matches the stored month gets to accrue; the loser
//! observes the failed write, treats it as "someone else already rolled
//! over", and skips the accrual step.
//!
//! Known accepted gaps, on purpose rather than by accident: a crash after
//! the marker write but before the appends leaves that month without its
//! mandatory entries (at-most-once accrual), and a user who stays away for
//! several months transitions straight to the real current month with a
//! single accrual, not one per skipped month.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::rollover::RolloverOutcome;
use crate::domain::commands::savings::RecordSavingsCommand;
use crate::domain::models::month::MonthKey;
use crate::domain::models::savings::SavingsSource;
use crate::domain::rules_service::RulesService;
use crate::domain::savings_service::SavingsService;
use crate::storage::traits::{Connection, UserMarkerStorage};

/// The month rollover engine
#[derive(Clone)]
pub struct RolloverService<C: Connection> {
    marker_repository: C::UserMarkerRepository,
    rules_service: RulesService<C>,
    savings_service: SavingsService<C>,
}

impl<C: Connection> RolloverService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let marker_repository = connection.create_user_marker_repository();
        let rules_service = RulesService::new(connection.clone());
        let savings_service = SavingsService::new(connection);
        Self {
            marker_repository,
            rules_service,
            savings_service,
        }
    }

    /// Whether the user's stored month is behind the real current month.
    ///
    /// Fails soft: an unknown user, or a store that cannot be read, both
    /// answer false. The store failure is logged distinctly so "unknown"
    /// is not silently conflated with "not needed".
    pub fn needs_rollover(&self, user_id: &str) -> bool {
        let actual = MonthKey::current();
        match self.marker_repository.get_marker(user_id) {
            Ok(Some(marker)) => {
                let needed = marker.current_month != actual;
                debug!(
                    "Rollover check for {}: stored {} vs actual {} -> {}",
                    user_id, marker.current_month, actual, needed
                );
                needed
            }
            Ok(None) => false,
            Err(err) => {
                warn!(
                    "Rollover check for {} could not read the store ({:#}); treating as not needed",
                    user_id, err
                );
                false
            }
        }
    }

    /// Advance the user's month to the real current month and accrue
    /// mandatory savings for it.
    ///
    /// Safe to call when no rollover is due: that case is a no-op. The
    /// target month is recomputed here rather than reused from the check,
    /// to tolerate the time gap between checking and acting.
    pub fn perform_rollover(&self, user_id: &str) -> Result<RolloverOutcome> {
        let target = MonthKey::current();

        let marker = self
            .marker_repository
            .get_marker(user_id)?
            .with_context(|| format!("User marker not found: {}", user_id))?;

        if marker.current_month == target {
            debug!("User {} is already in month {}", user_id, target);
            return Ok(RolloverOutcome::AlreadyCurrent { month: target });
        }

        // Advance the marker first so a crash past this point leaves the
        // month current instead of stuck. The conditional write is what
        // keeps a concurrent session from accruing the same month twice.
        let advanced =
            self.marker_repository
                .set_current_month_if(user_id, &marker.current_month, &target)?;
        if !advanced {
            info!(
                "Rollover for {} to {} already performed by another session; skipping accrual",
                user_id, target
            );
            return Ok(RolloverOutcome::LostRace { month: target });
        }

        let rules = self.rules_service.active_rules(user_id)?;
        for rule in &rules {
            self.savings_service.record_savings(RecordSavingsCommand {
                user_id: user_id.to_string(),
                month: target,
                amount: rule.amount,
                source: SavingsSource::Mandatory,
            })?;
        }

        info!(
            "Rolled {} over from {} to {} with {} mandatory savings entries",
            user_id,
            marker.current_month,
            target,
            rules.len()
        );

        Ok(RolloverOutcome::RolledOver {
            month: target,
            entries_created: rules.len(),
        })
    }
}
