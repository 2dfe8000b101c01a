//! Mandatory rule management.
//!
//! Rules persist across months; only active rules contribute to the
//! mandatory total and to rollover accrual. The rollover engine applies
//! their effect fresh each month, so rules themselves carry no month field.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::rules::{CreateRuleCommand, RuleResult, UpdateRuleCommand};
use crate::domain::models::rule::{MandatoryRule, RuleValidationError};
use crate::storage::traits::{Connection, MandatoryRuleStorage};

/// Service for managing mandatory deduction rules
#[derive(Clone)]
pub struct RulesService<C: Connection> {
    rule_repository: C::MandatoryRuleRepository,
}

impl<C: Connection> RulesService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let rule_repository = connection.create_mandatory_rule_repository();
        Self { rule_repository }
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(RuleValidationError::EmptyName.into());
        }
        Ok(())
    }

    fn validate_amount(amount: f64) -> Result<()> {
        if !amount.is_finite() {
            return Err(RuleValidationError::NonFiniteAmount.into());
        }
        if amount <= 0.0 {
            return Err(RuleValidationError::NonPositiveAmount.into());
        }
        Ok(())
    }

    /// Create a new rule. Rules start out active.
    pub fn create_rule(&self, command: CreateRuleCommand) -> Result<RuleResult> {
        info!(
            "Creating rule for {}: {} ({:.2})",
            command.user_id, command.name, command.amount
        );
        Self::validate_name(&command.name)?;
        Self::validate_amount(command.amount)?;

        let rule = MandatoryRule {
            id: MandatoryRule::generate_id(),
            user_id: command.user_id,
            name: command.name.trim().to_string(),
            amount: command.amount,
            is_active: true,
            created_at: Utc::now(),
        };
        self.rule_repository.store_rule(&rule)?;

        Ok(RuleResult { rule })
    }

    /// Update a rule's name, amount, and/or active flag.
    pub fn update_rule(&self, command: UpdateRuleCommand) -> Result<RuleResult> {
        info!("Updating rule {} for {}", command.rule_id, command.user_id);

        let mut rule = self
            .rule_repository
            .get_rule(&command.user_id, &command.rule_id)?
            .ok_or_else(|| anyhow::anyhow!("Rule not found: {}", command.rule_id))?;

        if let Some(name) = command.name {
            Self::validate_name(&name)?;
            rule.name = name.trim().to_string();
        }
        if let Some(amount) = command.amount {
            Self::validate_amount(amount)?;
            rule.amount = amount;
        }
        if let Some(is_active) = command.is_active {
            rule.is_active = is_active;
        }

        self.rule_repository.update_rule(&rule)?;

        Ok(RuleResult { rule })
    }

    /// Delete a rule. Returns false when the rule did not exist.
    pub fn delete_rule(&self, user_id: &str, rule_id: &str) -> Result<bool> {
        let deleted = self.rule_repository.delete_rule(user_id, rule_id)?;
        if deleted {
            info!("Deleted rule {} for {}", rule_id, user_id);
        } else {
            warn!("No rule {} found to delete for {}", rule_id, user_id);
        }
        Ok(deleted)
    }

    /// All rules for a user, active or not.
    pub fn all_rules(&self, user_id: &str) -> Result<Vec<MandatoryRule>> {
        self.rule_repository.list_rules(user_id)
    }

    /// Only the currently active rules.
    pub fn active_rules(&self, user_id: &str) -> Result<Vec<MandatoryRule>> {
        self.rule_repository.list_active_rules(user_id)
    }

    /// Sum of active rule amounts.
    pub fn total_mandatory_amount(&self, user_id: &str) -> Result<f64> {
        let rules = self.active_rules(user_id)?;
        Ok(rules.iter().map(|rule| rule.amount).sum())
    }
}
