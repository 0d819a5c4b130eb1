//! Project Documents
//!
//! Translation between `Project` and its stored JSON form.
//!
//! The store takes no unset fields, so every write is normalized: each key is
//! present and optional values become concrete defaults (`""`, `0`, `[]`,
//! `null`). Reads are lenient and also accept the legacy `deliverables` tree.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::serde_ext::null_as_default;
use crate::domain::{Customer, Deliverable, DomainError, DomainResult, Project, ProjectKind, Task, UserRef};

fn user_to_document(user: &UserRef) -> Value {
    json!({
        "id": user.id,
        "fullName": user.full_name,
        "email": user.email,
    })
}

/// Normalized form of one task node and its subtree
pub fn task_to_document(task: &Task) -> Value {
    json!({
        "id": task.id,
        "name": task.name,
        "description": task.description,
        "estimatedHours": task.estimated_hours.unwrap_or(0.0),
        "costPerHour": task.cost_per_hour.unwrap_or(0.0),
        "deadline": task.deadline.map(|d| d.to_rfc3339()),
        "completed": task.completed,
        "assignedTo": task.assigned_to.iter().map(user_to_document).collect::<Vec<_>>(),
        "children": task.children.iter().map(task_to_document).collect::<Vec<_>>(),
    })
}

/// Normalized document body; the project id is the store key, not a field
pub fn to_document(project: &Project) -> Value {
    json!({
        "internalId": project.internal_id,
        "name": project.name,
        "description": project.description,
        "customer": {
            "name": project.customer.name,
            "phone": project.customer.phone,
            "address": project.customer.address,
        },
        "createdAt": project.created_at.to_rfc3339(),
        "type": project.kind.as_str(),
        "tasks": project.tasks.iter().map(task_to_document).collect::<Vec<_>>(),
    })
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StoredProject {
    #[serde(deserialize_with = "null_as_default")]
    internal_id: String,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    description: String,
    customer: Option<Customer>,
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    kind: Option<String>,
    tasks: Option<Vec<Task>>,
    deliverables: Option<Vec<Deliverable>>,
}

/// Rebuild a project from the body stored under `id`
pub fn from_document(id: &str, body: &Value) -> DomainResult<Project> {
    if !body.is_object() {
        return Err(DomainError::InvalidInput(format!("Document {} is not an object", id)));
    }
    let stored: StoredProject = serde_json::from_value(body.clone())
        .map_err(|e| DomainError::InvalidInput(format!("Document {}: {}", id, e)))?;

    if let Some(kind) = stored.kind.as_deref() {
        if kind != ProjectKind::Project.as_str() {
            return Err(DomainError::InvalidInput(format!(
                "Document {} has type '{}', expected '{}'",
                id,
                kind,
                ProjectKind::Project.as_str()
            )));
        }
    }

    let tasks = match (stored.tasks, stored.deliverables) {
        (Some(tasks), _) => tasks,
        (None, Some(deliverables)) => deliverables.into_iter().map(Task::from).collect(),
        (None, None) => Vec::new(),
    };

    Ok(Project {
        id: id.to_string(),
        internal_id: stored.internal_id,
        name: stored.name,
        description: stored.description,
        customer: stored.customer.unwrap_or_default(),
        created_at: stored.created_at.unwrap_or_default(),
        kind: ProjectKind::Project,
        tasks,
    })
}
