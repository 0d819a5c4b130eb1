//! Project Store
//!
//! Owns the project repository together with a cached project list.
//!
//! Failure policy:
//! - mutations record the error as `last_error` and return it so callers can
//!   roll back optimistic UI
//! - reads record the error and degrade to `None` / an empty list
//!
//! After every successful mutation the cache is invalidated and re-fetched.
//! A failed re-fetch is recorded but does not undo the mutation. There is no
//! locking across read-modify-write: concurrent edits of one project are last
//! writer wins.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{DomainError, DomainResult, NewProject, Project, Task};
use crate::repository::Repository;
use crate::tree::audit_unique_ids;

/// Last known good project list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSnapshot {
    pub projects: Vec<Project>,
    /// When `projects` was last fetched successfully
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Set by a mutation until the next successful refresh
    pub pending_refresh: bool,
}

#[derive(Default)]
struct CacheState {
    snapshot: ProjectSnapshot,
    last_error: Option<DomainError>,
}

pub struct ProjectStore {
    repo: Arc<dyn Repository<Project>>,
    state: RwLock<CacheState>,
}

impl ProjectStore {
    pub fn new(repo: Arc<dyn Repository<Project>>) -> Self {
        Self {
            repo,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub fn repository(&self) -> &Arc<dyn Repository<Project>> {
        &self.repo
    }

    // ========================================================================
    // Cache
    // ========================================================================

    pub async fn snapshot(&self) -> ProjectSnapshot {
        self.state.read().await.snapshot.clone()
    }

    pub async fn last_error(&self) -> Option<DomainError> {
        self.state.read().await.last_error.clone()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.last_error = None;
    }

    /// Mark the cached list stale without fetching
    pub async fn invalidate(&self) {
        self.state.write().await.snapshot.pending_refresh = true;
    }

    /// Re-fetch the project list into the cache
    ///
    /// On failure the previous snapshot stays in place, still flagged stale.
    pub async fn refresh(&self) -> DomainResult<()> {
        match self.repo.list().await {
            Ok(projects) => {
                let mut state = self.state.write().await;
                state.snapshot = ProjectSnapshot {
                    projects,
                    refreshed_at: Some(Utc::now()),
                    pending_refresh: false,
                };
                Ok(())
            }
            Err(e) => {
                self.record_error("refresh projects", &e).await;
                Err(e)
            }
        }
    }

    pub(crate) async fn record_error(&self, context: &str, err: &DomainError) {
        log::error!("Failed to {}: {}", context, err);
        self.state.write().await.last_error = Some(err.clone());
    }

    /// Record a failed mutation and hand it back
    pub(crate) async fn guard<T>(&self, context: &str, result: DomainResult<T>) -> DomainResult<T> {
        if let Err(e) = &result {
            self.record_error(context, e).await;
        }
        result
    }

    pub(crate) async fn after_mutation(&self) {
        self.invalidate().await;
        // Recorded by refresh; the mutation itself already landed
        let _ = self.refresh().await;
    }

    // ========================================================================
    // Projects
    // ========================================================================

    pub async fn create(&self, new: NewProject) -> DomainResult<Project> {
        let project = new.into_project(Utc::now());
        let result = self.repo.create(&project).await;
        let created = self.guard("create project", result).await?;
        self.after_mutation().await;
        Ok(created)
    }

    /// Project by id; `None` when absent or when the read failed
    pub async fn fetch(&self, id: &str) -> Option<Project> {
        match self.repo.find_by_id(id.to_string()).await {
            Ok(project) => project,
            Err(e) => {
                self.record_error("fetch project", &e).await;
                None
            }
        }
    }

    /// All projects in repository order; empty when the read failed
    pub async fn fetch_all(&self) -> Vec<Project> {
        match self.refresh().await {
            Ok(()) => self.state.read().await.snapshot.projects.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Write `project` back as a whole document
    pub async fn update(&self, project: &Project) -> DomainResult<Project> {
        let result = self.repo.update(project).await;
        let updated = self.guard("update project", result).await?;
        self.after_mutation().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = self.repo.delete(id.to_string()).await;
        self.guard("delete project", result).await?;
        self.after_mutation().await;
        Ok(())
    }

    /// Project for an edit; absence is an error here
    pub(crate) async fn load(&self, id: &str) -> DomainResult<Project> {
        let project = self
            .repo
            .find_by_id(id.to_string())
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Project {}", id)))?;

        if let Err(e) = audit_unique_ids(&project.tasks) {
            log::warn!("Project {} failed id audit: {}", id, e);
        }
        Ok(project)
    }

    /// Fetch, rewrite the task tree with `edit`, write the whole document
    pub(crate) async fn rewrite_tasks<F>(&self, project_id: &str, context: &str, edit: F) -> DomainResult<Project>
    where
        F: FnOnce(&[Task]) -> DomainResult<Vec<Task>> + Send,
    {
        let result = async move {
            let mut project = self.load(project_id).await?;
            project.tasks = edit(project.tasks.as_slice())?;
            self.repo.update(&project).await
        }
        .await;

        let project = self.guard(context, result).await?;
        self.after_mutation().await;
        Ok(project)
    }
}
