//! User-Task Aggregator
//!
//! Collects every task assigned to a user across all projects.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, Project, Task};
use crate::tree::collect_matching;
use super::auth::AuthProvider;
use super::project_store::ProjectStore;

/// A task paired with the project it was found in
///
/// `project_id` is attached for navigation only and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTask {
    pub project_id: String,
    #[serde(flatten)]
    pub task: Task,
}

/// Assigned tasks in project order, each tree walked parent before children
pub fn collect_assigned(projects: &[Project], user_id: &str) -> Vec<AssignedTask> {
    projects
        .iter()
        .flat_map(|project| {
            collect_matching(&project.tasks, |task| task.is_assigned_to(user_id))
                .into_iter()
                .map(move |task| AssignedTask {
                    project_id: project.id.clone(),
                    task: task.clone(),
                })
        })
        .collect()
}

#[async_trait]
pub trait AssignedTaskOperations {
    /// Tasks assigned to the signed-in user
    async fn find_assigned(&self, auth: &dyn AuthProvider) -> DomainResult<Vec<AssignedTask>>;

    /// Tasks assigned to `user_id`; empty when the project list could not be read
    async fn find_assigned_to(&self, user_id: &str) -> Vec<AssignedTask>;
}

#[async_trait]
impl AssignedTaskOperations for ProjectStore {
    async fn find_assigned(&self, auth: &dyn AuthProvider) -> DomainResult<Vec<AssignedTask>> {
        let user_id = auth.current_user_id().ok_or(DomainError::Unauthenticated)?;
        Ok(self.find_assigned_to(&user_id).await)
    }

    async fn find_assigned_to(&self, user_id: &str) -> Vec<AssignedTask> {
        let projects = self.fetch_all().await;
        let assigned = collect_assigned(&projects, user_id);
        log::debug!("Found {} tasks assigned to {}", assigned.len(), user_id);
        assigned
    }
}
