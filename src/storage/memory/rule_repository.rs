use anyhow::Result;

use super::connection::MemoryConnection;
use crate::domain::models::rule::MandatoryRule;
use crate::storage::traits::MandatoryRuleStorage;

/// In-memory mandatory rule repository
#[derive(Clone)]
pub struct RuleRepository {
    connection: MemoryConnection,
}

impl RuleRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl MandatoryRuleStorage for RuleRepository {
    fn store_rule(&self, rule: &MandatoryRule) -> Result<()> {
        let mut rules = self.connection.store.rules.lock().unwrap();
        rules.insert(rule.id.clone(), rule.clone());
        Ok(())
    }

    fn get_rule(&self, user_id: &str, rule_id: &str) -> Result<Option<MandatoryRule>> {
        let rules = self.connection.store.rules.lock().unwrap();
        Ok(rules
            .get(rule_id)
            .filter(|rule| rule.user_id == user_id)
            .cloned())
    }

    fn update_rule(&self, rule: &MandatoryRule) -> Result<()> {
        let mut rules = self.connection.store.rules.lock().unwrap();
        if !rules.contains_key(&rule.id) {
            return Err(anyhow::anyhow!("Rule not found: {}", rule.id));
        }
        rules.insert(rule.id.clone(), rule.clone());
        Ok(())
    }

    fn delete_rule(&self, user_id: &str, rule_id: &str) -> Result<bool> {
        let mut rules = self.connection.store.rules.lock().unwrap();
        let owned = rules
            .get(rule_id)
            .map(|rule| rule.user_id == user_id)
            .unwrap_or(false);
        if owned {
            rules.remove(rule_id);
        }
        Ok(owned)
    }

    fn list_rules(&self, user_id: &str) -> Result<Vec<MandatoryRule>> {
        let rules = self.connection.store.rules.lock().unwrap();
        let mut result: Vec<MandatoryRule> = rules
            .values()
            .filter(|rule| rule.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    fn list_active_rules(&self, user_id: &str) -> Result<Vec<MandatoryRule>> {
        let mut result = self.list_rules(user_id)?;
        result.retain(|rule| rule.is_active);
        Ok(result)
    }
}
