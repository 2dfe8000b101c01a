use anyhow::Result;

use super::connection::{JsonConnection, CATEGORIES_FILE};
use crate::domain::models::category::Category;
use crate::domain::models::month::MonthKey;
use crate::storage::traits::CategoryStorage;

/// JSON-file category repository. `increment_spent` holds the I/O lock
/// across its read-modify-write, so concurrent increments through the same
/// connection always compose.
#[derive(Clone)]
pub struct CategoryRepository {
    connection: JsonConnection,
}

impl CategoryRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl CategoryStorage for CategoryRepository {
    fn store_category(&self, category: &Category) -> Result<()> {
        let _io = self.connection.lock_io();
        let mut categories: Vec<Category> =
            self.connection.read_list(&category.user_id, CATEGORIES_FILE)?;
        categories.push(category.clone());
        self.connection
            .write_file(&category.user_id, CATEGORIES_FILE, &categories)
    }

    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>> {
        let _io = self.connection.lock_io();
        let categories: Vec<Category> = self.connection.read_list(user_id, CATEGORIES_FILE)?;
        Ok(categories
            .into_iter()
            .find(|category| category.id == category_id))
    }

    fn list_for_month(&self, user_id: &str, month: &MonthKey) -> Result<Vec<Category>> {
        let _io = self.connection.lock_io();
        let mut categories: Vec<Category> = self.connection.read_list(user_id, CATEGORIES_FILE)?;
        categories.retain(|category| category.month == *month);
        Ok(categories)
    }

    fn update_details(
        &self,
        user_id: &str,
        category_id: &str,
        name: Option<&str>,
        budgeted: Option<f64>,
    ) -> Result<()> {
        let _io = self.connection.lock_io();
        let mut categories: Vec<Category> = self.connection.read_list(user_id, CATEGORIES_FILE)?;
        let category = categories
            .iter_mut()
            .find(|category| category.id == category_id)
            .ok_or_else(|| anyhow::anyhow!("Category not found: {}", category_id))?;
        if let Some(name) = name {
            category.name = name.to_string();
        }
        if let Some(budgeted) = budgeted {
            category.budgeted = budgeted;
        }
        self.connection
            .write_file(user_id, CATEGORIES_FILE, &categories)
    }

    fn increment_spent(&self, user_id: &str, category_id: &str, delta: f64) -> Result<bool> {
        let _io = self.connection.lock_io();
        let mut categories: Vec<Category> = self.connection.read_list(user_id, CATEGORIES_FILE)?;
        match categories
            .iter_mut()
            .find(|category| category.id == category_id)
        {
            Some(category) => {
                category.spent += delta;
                self.connection
                    .write_file(user_id, CATEGORIES_FILE, &categories)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_category(&self, user_id: &str, category_id: &str) -> Result<bool> {
        let _io = self.connection.lock_io();
        let mut categories: Vec<Category> = self.connection.read_list(user_id, CATEGORIES_FILE)?;
        let before = categories.len();
        categories.retain(|category| category.id != category_id);
        if categories.len() == before {
            return Ok(false);
        }
        self.connection
            .write_file(user_id, CATEGORIES_FILE, &categories)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup() -> (CategoryRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (CategoryRepository::new(connection), temp_dir)
    }

    fn category(user_id: &str, month: &str, name: &str, budgeted: f64) -> Category {
        Category {
            id: Category::generate_id(),
            user_id: user_id.to_string(),
            month: month.parse().unwrap(),
            name: name.to_string(),
            budgeted,
            spent: 0.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_spent_increments_persist() {
        let (repo, _temp_dir) = setup();
        let food = category("u1", "2026-02", "Food", 8000.0);
        repo.store_category(&food).unwrap();

        assert!(repo.increment_spent("u1", &food.id, 300.0).unwrap());
        assert!(repo.increment_spent("u1", &food.id, 200.0).unwrap());

        let stored = repo.get_category("u1", &food.id).unwrap().unwrap();
        assert_eq!(stored.spent, 500.0);
    }

    #[test]
    fn test_update_details_preserves_spent() {
        let (repo, _temp_dir) = setup();
        let food = category("u1", "2026-02", "Food", 8000.0);
        repo.store_category(&food).unwrap();
        repo.increment_spent("u1", &food.id, 777.0).unwrap();

        repo.update_details("u1", &food.id, None, Some(10000.0)).unwrap();

        let stored = repo.get_category("u1", &food.id).unwrap().unwrap();
        assert_eq!(stored.budgeted, 10000.0);
        assert_eq!(stored.spent, 777.0);
        assert_eq!(stored.name, "Food");
    }

    #[test]
    fn test_delete_category() {
        let (repo, _temp_dir) = setup();
        let food = category("u1", "2026-02", "Food", 8000.0);
        repo.store_category(&food).unwrap();

        assert!(repo.delete_category("u1", &food.id).unwrap());
        assert!(repo.get_category("u1", &food.id).unwrap().is_none());
        assert!(!repo.delete_category("u1", &food.id).unwrap());
    }
}
