//! Task Operations
//!
//! Edits of a project's task tree. Each write is a read-modify-write of the
//! whole project document.

use async_trait::async_trait;

use crate::domain::{DomainError, DomainResult, NewTask, PathSegment, Task, TaskPatch, TaskPath};
use crate::tree::{insert_child, patch_task, remove_node, resolve, toggle_completion};
use super::project_store::ProjectStore;

/// Trait for task tree operations
#[async_trait]
pub trait ProjectTaskOperations {
    /// Append a new task under `parent_path` (root when empty)
    async fn add_task(&self, project_id: &str, parent_path: &TaskPath, task: NewTask) -> DomainResult<Task>;

    /// Shallow-merge `patch` into the task at `path`
    async fn update_task(&self, project_id: &str, path: &TaskPath, patch: &TaskPatch) -> DomainResult<Task>;

    /// Delete `task_id` and its subtree from under `parent_path`
    async fn delete_task(&self, project_id: &str, parent_path: &TaskPath, task_id: &str) -> DomainResult<()>;

    /// Flip completion of the task at `path`
    async fn toggle_task(&self, project_id: &str, path: &TaskPath) -> DomainResult<Task>;

    /// Task at `path`; `None` when the project or node is absent or the read failed
    async fn get_task(&self, project_id: &str, path: &TaskPath) -> Option<Task>;
}

fn task_at(tasks: &[Task], path: &TaskPath) -> DomainResult<Task> {
    resolve(tasks, path.ids())
        .cloned()
        .ok_or_else(|| DomainError::Internal(format!("Task at {} missing after write", path)))
}

#[async_trait]
impl ProjectTaskOperations for ProjectStore {
    async fn add_task(&self, project_id: &str, parent_path: &TaskPath, task: NewTask) -> DomainResult<Task> {
        let node = task.into_task();
        let path = parent_path.child(PathSegment::task(node.id.clone()));

        let project = self
            .rewrite_tasks(project_id, "add task", move |tasks| insert_child(tasks, parent_path, node))
            .await?;

        log::info!("Added task {} to project {}", path, project_id);
        task_at(&project.tasks, &path)
    }

    async fn update_task(&self, project_id: &str, path: &TaskPath, patch: &TaskPatch) -> DomainResult<Task> {
        let project = self
            .rewrite_tasks(project_id, "update task", |tasks| patch_task(tasks, path, patch))
            .await?;
        task_at(&project.tasks, path)
    }

    async fn delete_task(&self, project_id: &str, parent_path: &TaskPath, task_id: &str) -> DomainResult<()> {
        self.rewrite_tasks(project_id, "delete task", |tasks| remove_node(tasks, parent_path, task_id))
            .await?;
        log::info!("Deleted task {} under {} in project {}", task_id, parent_path, project_id);
        Ok(())
    }

    async fn toggle_task(&self, project_id: &str, path: &TaskPath) -> DomainResult<Task> {
        let project = self
            .rewrite_tasks(project_id, "toggle task", |tasks| toggle_completion(tasks, path))
            .await?;
        task_at(&project.tasks, path)
    }

    async fn get_task(&self, project_id: &str, path: &TaskPath) -> Option<Task> {
        let project = self.fetch(project_id).await?;
        resolve(&project.tasks, path.ids()).cloned()
    }
}
