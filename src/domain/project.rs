//! Project Entity
//!
//! A project is persisted as one document holding its entire task tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::serde_ext::null_as_default;
use super::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
}

/// Fixed document type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    #[default]
    Project,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Project => "project",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Assigned by the document store; empty until created
    pub id: String,
    /// Human-readable reference shown to users
    pub internal_id: String,
    pub name: String,
    pub description: String,
    pub customer: Customer,
    pub created_at: DateTime<Utc>,
    pub kind: ProjectKind,
    /// Root-level task nodes
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        NewProject::named(name).into_project(Utc::now())
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Number of nodes in the whole tree
    pub fn task_count(&self) -> usize {
        fn count(tasks: &[Task]) -> usize {
            tasks.iter().map(|t| 1 + count(&t.children)).sum()
        }
        count(&self.tasks)
    }
}

impl Entity for Project {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Fields supplied when creating a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProject {
    pub internal_id: Option<String>,
    pub name: String,
    pub description: String,
    pub customer: Customer,
    pub tasks: Vec<Task>,
}

impl NewProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn into_project(self, now: DateTime<Utc>) -> Project {
        let internal_id = self
            .internal_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("PRJ-{}", now.format("%Y%m%d-%H%M%S")));

        Project {
            id: String::new(),
            internal_id,
            name: self.name,
            description: self.description,
            customer: self.customer,
            created_at: now,
            kind: ProjectKind::Project,
            tasks: self.tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_project_creation() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let project = NewProject::named("Renovation").into_project(now);
        assert_eq!(project.internal_id, "PRJ-20240305-140709");
        assert!(!project.is_persisted());
        assert_eq!(project.kind.as_str(), "project");
    }

    #[test]
    fn test_explicit_internal_id_kept() {
        let mut new = NewProject::named("Renovation");
        new.internal_id = Some("R-42".to_string());
        assert_eq!(new.into_project(Utc::now()).internal_id, "R-42");
    }

    #[test]
    fn test_task_count() {
        let mut project = Project::new("Counted");
        project.tasks = vec![
            Task::with_id("a", "A").with_children(vec![Task::with_id("b", "B")]),
            Task::with_id("c", "C"),
        ];
        assert_eq!(project.task_count(), 3);
    }
}
