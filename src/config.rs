//! Application Configuration
//!
//! Loaded from a JSON file. Every key is optional; a missing file yields the
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Backing document store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// File name under `data_dir`, or `:memory:`
    pub database_file: String,
    pub backend: StoreBackend,
    /// Collection holding the project documents
    pub collection: String,
    /// File logging is off when unset
    pub log_dir: Option<PathBuf>,
    pub app_name: String,
    pub log_max_file_bytes: u64,
    pub log_max_files: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            database_file: "project_tree.db".to_string(),
            backend: StoreBackend::Sqlite,
            collection: "projects".to_string(),
            log_dir: None,
            app_name: "ProjectTree".to_string(),
            log_max_file_bytes: 1024 * 1024,
            log_max_files: 5,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> DomainResult<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::InvalidInput(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| DomainError::InvalidInput(format!("Invalid config {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> DomainResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| DomainError::Persistence(format!("Failed to write {}: {}", path.display(), e)))
    }

    pub fn database_path(&self) -> PathBuf {
        if self.database_file == ":memory:" {
            PathBuf::from(":memory:")
        } else {
            self.data_dir.join(&self.database_file)
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.collection.trim().is_empty() {
            return Err(DomainError::InvalidInput("Collection name must not be empty".to_string()));
        }
        if self.backend == StoreBackend::Sqlite && self.database_file.trim().is_empty() {
            return Err(DomainError::InvalidInput("Database file must not be empty".to_string()));
        }
        Ok(())
    }
}
