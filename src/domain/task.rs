//! Task Entity
//!
//! One node of a project's work-breakdown tree. Nodes nest to any depth
//! through `children`; a node owns its whole subtree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::serde_ext::{double_option, null_as_default};

/// Snapshot of a user embedded in an assignment list
///
/// Copied by value when assigned; not refreshed when the profile changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

impl UserRef {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            email: email.into(),
        }
    }
}

/// A task node with nested sub-tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within the owning project
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub cost_per_hour: Option<f64>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_to: Vec<UserRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Task>,
}

/// Generate a fresh node identifier
pub fn generate_task_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Task {
    /// Create a task with a freshly generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(generate_task_id(), name)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            estimated_hours: None,
            cost_per_hour: None,
            deadline: None,
            completed: false,
            assigned_to: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Task>) -> Self {
        self.children = children;
        self
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_to.iter().any(|user| user.id == user_id)
    }

    /// Shallow-merge the provided fields; `children` is never touched
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(hours) = patch.estimated_hours {
            self.estimated_hours = hours;
        }
        if let Some(cost) = patch.cost_per_hour {
            self.cost_per_hour = cost;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(assigned_to) = &patch.assigned_to {
            self.assigned_to = assigned_to.clone();
        }
    }
}

/// Fields supplied when creating a task; the id is generated on insert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub estimated_hours: Option<f64>,
    pub cost_per_hour: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub assigned_to: Vec<UserRef>,
}

impl NewTask {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn into_task(self) -> Task {
        Task {
            id: generate_task_id(),
            name: self.name,
            description: self.description,
            estimated_hours: self.estimated_hours,
            cost_per_hour: self.cost_per_hour,
            deadline: self.deadline,
            completed: false,
            assigned_to: self.assigned_to,
            children: Vec::new(),
        }
    }
}

/// Partial update for a single node
///
/// `None` leaves a field alone. The optional task fields take
/// `Some(None)` to clear them, which is `null` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<Option<f64>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub cost_per_hour: Option<Option<f64>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    pub completed: Option<bool>,
    pub assigned_to: Option<Vec<UserRef>>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &TaskPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("Wire the kitchen");
        assert!(!task.id.is_empty());
        assert_eq!(task.name, "Wire the kitchen");
        assert!(!task.completed);
        assert!(task.children.is_empty());
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = NewTask::named("a").into_task();
        let b = NewTask::named("a").into_task();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_patch_keeps_untouched_fields() {
        let mut task = Task::with_id("a", "Original")
            .with_children(vec![Task::with_id("b", "Child")]);
        task.description = "keep me".to_string();

        task.apply(&TaskPatch::completed(true));

        assert!(task.completed);
        assert_eq!(task.name, "Original");
        assert_eq!(task.description, "keep me");
        assert_eq!(task.children.len(), 1);
    }

    #[test]
    fn test_assignment_lookup() {
        let mut task = Task::with_id("a", "Assigned");
        task.assigned_to.push(UserRef::new("u1", "Ana Lima", "ana@example.com"));
        assert!(task.is_assigned_to("u1"));
        assert!(!task.is_assigned_to("u2"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::completed(false).is_empty());
    }

    #[test]
    fn test_patch_sets_and_clears_optional_fields() {
        let mut task = Task::with_id("a", "Estimate");
        task.apply(&TaskPatch {
            estimated_hours: Some(Some(4.0)),
            deadline: Some(Some(Utc::now())),
            ..Default::default()
        });
        assert_eq!(task.estimated_hours, Some(4.0));
        assert!(task.deadline.is_some());

        let patch: TaskPatch = serde_json::from_str(r#"{"estimatedHours": null, "deadline": null}"#).unwrap();
        task.apply(&patch);
        assert_eq!(task.estimated_hours, None);
        assert_eq!(task.deadline, None);
    }

    #[test]
    fn test_patch_without_key_keeps_value() {
        let mut task = Task::with_id("a", "Costed");
        task.cost_per_hour = Some(80.0);

        let patch: TaskPatch = serde_json::from_str(r#"{"name": "Renamed"}"#).unwrap();
        task.apply(&patch);
        assert_eq!(task.cost_per_hour, Some(80.0));
        assert_eq!(task.name, "Renamed");
    }

    #[test]
    fn test_task_reads_explicit_nulls() {
        let task: Task = serde_json::from_str(
            r#"{"id":"a","name":null,"description":null,"completed":null,"assignedTo":null,"children":null}"#,
        )
        .unwrap();
        assert_eq!(task.name, "");
        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert!(task.assigned_to.is_empty());
        assert!(task.children.is_empty());
    }

    #[test]
    fn test_task_deserializes_with_missing_fields() {
        let task: Task = serde_json::from_str(r#"{"id":"a","name":"Bare"}"#).unwrap();
        assert_eq!(task.estimated_hours, None);
        assert!(task.assigned_to.is_empty());
    }
}
