use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::storage::traits::Connection;

pub(super) const MARKER_FILE: &str = "user.json";
pub(super) const INCOME_FILE: &str = "income.json";
pub(super) const RULES_FILE: &str = "rules.json";
pub(super) const CATEGORIES_FILE: &str = "categories.json";
pub(super) const EXPENSES_FILE: &str = "expenses.json";
pub(super) const SAVINGS_FILE: &str = "savings.json";

/// JsonConnection manages file paths and serialization for the per-user
/// JSON document files.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: Arc<Mutex<PathBuf>>,
    io_lock: Arc<Mutex<()>>,
}

impl JsonConnection {
    /// Create a new JSON connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {:?}", base_path))?;
        }

        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_path)),
            io_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Create a new JSON connection in the platform's default data directory
    pub fn new_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "Budget Tracker")
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        let data_dir = dirs.data_dir().to_path_buf();
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> PathBuf {
        let base_dir = self.base_directory.lock().unwrap();
        base_dir.clone()
    }

    /// Guard serializing read-modify-write sequences across repositories
    /// created from this connection.
    pub(super) fn lock_io(&self) -> MutexGuard<'_, ()> {
        self.io_lock.lock().unwrap()
    }

    fn user_directory(&self, user_id: &str) -> PathBuf {
        let base_dir = self.base_directory.lock().unwrap();
        base_dir.join(user_id)
    }

    fn collection_path(&self, user_id: &str, file: &str) -> PathBuf {
        self.user_directory(user_id).join(file)
    }

    /// Serialize a value to a collection file, creating the user directory
    /// on first write. Uses the atomic write pattern: write to a temp file,
    /// then rename over the target.
    pub(super) fn write_file<T: Serialize>(&self, user_id: &str, file: &str, value: &T) -> Result<()> {
        let user_dir = self.user_directory(user_id);
        if !user_dir.exists() {
            fs::create_dir_all(&user_dir)
                .with_context(|| format!("Failed to create user directory {:?}", user_dir))?;
        }

        let path = user_dir.join(file);
        let content = serde_json::to_string_pretty(value)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {:?}", path))?;
        Ok(())
    }

    /// Read a whole collection file. A missing file reads as `None`.
    pub(super) fn read_file<T: DeserializeOwned>(
        &self,
        user_id: &str,
        file: &str,
    ) -> Result<Option<T>> {
        let path = self.collection_path(user_id, file);
        if !path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Malformed collection file {:?}", path))?;
        Ok(Some(value))
    }

    /// Read a list-shaped collection file. A missing file reads as empty.
    pub(super) fn read_list<T: DeserializeOwned>(&self, user_id: &str, file: &str) -> Result<Vec<T>> {
        Ok(self.read_file(user_id, file)?.unwrap_or_default())
    }
}

impl Connection for JsonConnection {
    type UserMarkerRepository = super::user_repository::UserMarkerRepository;
    type IncomeRepository = super::income_repository::IncomeRepository;
    type MandatoryRuleRepository = super::rule_repository::RuleRepository;
    type CategoryRepository = super::category_repository::CategoryRepository;
    type ExpenseRepository = super::expense_repository::ExpenseRepository;
    type SavingsRepository = super::savings_repository::SavingsRepository;

    fn create_user_marker_repository(&self) -> Self::UserMarkerRepository {
        super::user_repository::UserMarkerRepository::new(self.clone())
    }

    fn create_income_repository(&self) -> Self::IncomeRepository {
        super::income_repository::IncomeRepository::new(self.clone())
    }

    fn create_mandatory_rule_repository(&self) -> Self::MandatoryRuleRepository {
        super::rule_repository::RuleRepository::new(self.clone())
    }

    fn create_category_repository(&self) -> Self::CategoryRepository {
        super::category_repository::CategoryRepository::new(self.clone())
    }

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        super::expense_repository::ExpenseRepository::new(self.clone())
    }

    fn create_savings_repository(&self) -> Self::SavingsRepository {
        super::savings_repository::SavingsRepository::new(self.clone())
    }
}
