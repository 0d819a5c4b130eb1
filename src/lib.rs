//! Project Tree Backend
//!
//! Layered architecture:
//! - domain: Projects, task nodes, paths and the error taxonomy
//! - tree: Path resolution and pure edits of a recursive task tree
//! - repository: Document stores and the project repository
//! - services: Cached project store, task edits and per-user aggregation

use std::path::PathBuf;
use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod repository;
pub mod services;
pub mod tree;

use config::{AppConfig, StoreBackend};
use domain::DomainResult;
use repository::{init_db, DbState, DocumentStore, MemoryDocumentStore, ProjectRepository, SqliteDocumentStore};
use services::ProjectStore;

/// Application state shared by callers
pub struct App {
    pub config: AppConfig,
    /// Present for the SQLite backend only
    pub db_state: Option<DbState>,
    pub projects: Arc<ProjectStore>,
}

fn init_logging(config: &AppConfig, log_dir: PathBuf) {
    let logger_config = rolling_logger::LoggerConfig {
        max_file_bytes: config.log_max_file_bytes,
        max_files: config.log_max_files,
        ..Default::default()
    };
    if let Err(e) = rolling_logger::init_logger_with(log_dir, &config.app_name, logger_config) {
        eprintln!("[{}] Logger not started: {}", chrono::Local::now().format("%H:%M:%S%.3f"), e);
    }
}

/// Wire logger, storage and the project store from `config`
pub async fn init_app(config: AppConfig) -> DomainResult<App> {
    config.validate()?;

    if let Some(log_dir) = config.log_dir.clone() {
        init_logging(&config, log_dir);
    }

    let mut db_state = None;
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryDocumentStore::new()),
        StoreBackend::Sqlite => {
            let state = init_db(&config.database_path()).await?;
            let store = SqliteDocumentStore::new(state.conn.clone());
            db_state = Some(state);
            Arc::new(store)
        }
    };

    let repo = ProjectRepository::new(store, config.collection.clone());
    let projects = Arc::new(ProjectStore::new(Arc::new(repo)));

    if let Err(e) = projects.refresh().await {
        log::warn!("Initial project load failed: {}", e);
    }
    log::info!("{} ready ({:?} backend)", config.app_name, config.backend);

    Ok(App {
        config,
        db_state,
        projects,
    })
}
