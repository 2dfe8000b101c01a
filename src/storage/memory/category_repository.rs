use anyhow::Result;

use super::connection::MemoryConnection;
use crate::domain::models::category::Category;
use crate::domain::models::month::MonthKey;
use crate::storage::traits::CategoryStorage;

/// In-memory category repository.
///
/// `increment_spent` runs entirely under the collection lock, so concurrent
/// increments compose instead of overwriting each other.
#[derive(Clone)]
pub struct CategoryRepository {
    connection: MemoryConnection,
}

impl CategoryRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl CategoryStorage for CategoryRepository {
    fn store_category(&self, category: &Category) -> Result<()> {
        let mut categories = self.connection.store.categories.lock().unwrap();
        categories.insert(category.id.clone(), category.clone());
        Ok(())
    }

    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>> {
        let categories = self.connection.store.categories.lock().unwrap();
        Ok(categories
            .get(category_id)
            .filter(|category| category.user_id == user_id)
            .cloned())
    }

    fn list_for_month(&self, user_id: &str, month: &MonthKey) -> Result<Vec<Category>> {
        let categories = self.connection.store.categories.lock().unwrap();
        let mut result: Vec<Category> = categories
            .values()
            .filter(|category| category.user_id == user_id && category.month == *month)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    fn update_details(
        &self,
        user_id: &str,
        category_id: &str,
        name: Option<&str>,
        budgeted: Option<f64>,
    ) -> Result<()> {
        let mut categories = self.connection.store.categories.lock().unwrap();
        let category = categories
            .get_mut(category_id)
            .filter(|category| category.user_id == user_id)
            .ok_or_else(|| anyhow::anyhow!("Category not found: {}", category_id))?;
        if let Some(name) = name {
            category.name = name.to_string();
        }
        if let Some(budgeted) = budgeted {
            category.budgeted = budgeted;
        }
        Ok(())
    }

    fn increment_spent(&self, user_id: &str, category_id: &str, delta: f64) -> Result<bool> {
        let mut categories = self.connection.store.categories.lock().unwrap();
        match categories
            .get_mut(category_id)
            .filter(|category| category.user_id == user_id)
        {
            Some(category) => {
                category.spent += delta;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_category(&self, user_id: &str, category_id: &str) -> Result<bool> {
        let mut categories = self.connection.store.categories.lock().unwrap();
        let owned = categories
            .get(category_id)
            .map(|category| category.user_id == user_id)
            .unwrap_or(false);
        if owned {
            categories.remove(category_id);
        }
        Ok(owned)
    }
}
