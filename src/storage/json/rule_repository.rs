use anyhow::Result;

use super::connection::{JsonConnection, RULES_FILE};
use crate::domain::models::rule::MandatoryRule;
use crate::storage::traits::MandatoryRuleStorage;

/// JSON-file mandatory rule repository
#[derive(Clone)]
pub struct RuleRepository {
    connection: JsonConnection,
}

impl RuleRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl MandatoryRuleStorage for RuleRepository {
    fn store_rule(&self, rule: &MandatoryRule) -> Result<()> {
        let _io = self.connection.lock_io();
        let mut rules: Vec<MandatoryRule> = self.connection.read_list(&rule.user_id, RULES_FILE)?;
        rules.push(rule.clone());
        self.connection.write_file(&rule.user_id, RULES_FILE, &rules)
    }

    fn get_rule(&self, user_id: &str, rule_id: &str) -> Result<Option<MandatoryRule>> {
        let _io = self.connection.lock_io();
        let rules: Vec<MandatoryRule> = self.connection.read_list(user_id, RULES_FILE)?;
        Ok(rules.into_iter().find(|rule| rule.id == rule_id))
    }

    fn update_rule(&self, rule: &MandatoryRule) -> Result<()> {
        let _io = self.connection.lock_io();
        let mut rules: Vec<MandatoryRule> = self.connection.read_list(&rule.user_id, RULES_FILE)?;
        let slot = rules
            .iter_mut()
            .find(|existing| existing.id == rule.id)
            .ok_or_else(|| anyhow::anyhow!("Rule not found: {}", rule.id))?;
        *slot = rule.clone();
        self.connection.write_file(&rule.user_id, RULES_FILE, &rules)
    }

    fn delete_rule(&self, user_id: &str, rule_id: &str) -> Result<bool> {
        let _io = self.connection.lock_io();
        let mut rules: Vec<MandatoryRule> = self.connection.read_list(user_id, RULES_FILE)?;
        let before = rules.len();
        rules.retain(|rule| rule.id != rule_id);
        if rules.len() == before {
            return Ok(false);
        }
        self.connection.write_file(user_id, RULES_FILE, &rules)?;
        Ok(true)
    }

    fn list_rules(&self, user_id: &str) -> Result<Vec<MandatoryRule>> {
        let _io = self.connection.lock_io();
        self.connection.read_list(user_id, RULES_FILE)
    }

    fn list_active_rules(&self, user_id: &str) -> Result<Vec<MandatoryRule>> {
        let mut rules = self.list_rules(user_id)?;
        rules.retain(|rule| rule.is_active);
        Ok(rules)
    }
}
