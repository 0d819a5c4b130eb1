//! Legacy Deliverable / SubTask Model
//!
//! Older project documents store a two-level tree (deliverables holding
//! sub-tasks) with a single assignee per node. Both levels map onto `Task`;
//! the tree algorithms only ever see `Task`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};
use super::serde_ext::null_as_default;
use super::task::{Task, UserRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
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
    #[serde(default)]
    pub assigned_to: Option<UserRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
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
    #[serde(default)]
    pub assigned_to: Option<UserRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_tasks: Vec<SubTask>,
}

impl From<SubTask> for Task {
    fn from(sub: SubTask) -> Self {
        Task {
            id: sub.id,
            name: sub.name,
            description: sub.description,
            estimated_hours: sub.estimated_hours,
            cost_per_hour: sub.cost_per_hour,
            deadline: sub.deadline,
            completed: sub.completed,
            assigned_to: sub.assigned_to.into_iter().collect(),
            children: Vec::new(),
        }
    }
}

impl From<Deliverable> for Task {
    fn from(deliverable: Deliverable) -> Self {
        Task {
            id: deliverable.id,
            name: deliverable.name,
            description: deliverable.description,
            estimated_hours: deliverable.estimated_hours,
            cost_per_hour: deliverable.cost_per_hour,
            deadline: deliverable.deadline,
            completed: deliverable.completed,
            assigned_to: deliverable.assigned_to.into_iter().collect(),
            children: deliverable.sub_tasks.into_iter().map(Task::from).collect(),
        }
    }
}

fn single_assignee(task: &Task) -> DomainResult<Option<UserRef>> {
    match task.assigned_to.as_slice() {
        [] => Ok(None),
        [user] => Ok(Some(user.clone())),
        _ => Err(DomainError::InvalidInput(format!(
            "Task {} has {} assignees, the two-level model allows one",
            task.id,
            task.assigned_to.len()
        ))),
    }
}

impl TryFrom<Task> for SubTask {
    type Error = DomainError;

    fn try_from(task: Task) -> DomainResult<Self> {
        if !task.children.is_empty() {
            return Err(DomainError::InvalidInput(format!(
                "Task {} nests deeper than two levels",
                task.id
            )));
        }
        let assigned_to = single_assignee(&task)?;
        Ok(SubTask {
            id: task.id,
            name: task.name,
            description: task.description,
            estimated_hours: task.estimated_hours,
            cost_per_hour: task.cost_per_hour,
            deadline: task.deadline,
            completed: task.completed,
            assigned_to,
        })
    }
}

impl TryFrom<Task> for Deliverable {
    type Error = DomainError;

    fn try_from(task: Task) -> DomainResult<Self> {
        let assigned_to = single_assignee(&task)?;
        let sub_tasks = task
            .children
            .into_iter()
            .map(SubTask::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Deliverable {
            id: task.id,
            name: task.name,
            description: task.description,
            estimated_hours: task.estimated_hours,
            cost_per_hour: task.cost_per_hour,
            deadline: task.deadline,
            completed: task.completed,
            assigned_to,
            sub_tasks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Deliverable {
        serde_json::from_value(serde_json::json!({
            "id": "d1",
            "name": "Design",
            "assignedTo": {"id": "u1", "fullName": "Ana Lima", "email": "ana@example.com"},
            "subTasks": [{"id": "s1", "name": "Sketch", "completed": true}]
        }))
        .unwrap()
    }

    #[test]
    fn test_deliverable_to_task() {
        let task = Task::from(sample());
        assert_eq!(task.id, "d1");
        assert_eq!(task.assigned_to.len(), 1);
        assert_eq!(task.children.len(), 1);
        assert!(task.children[0].completed);
        assert!(task.children[0].assigned_to.is_empty());
    }

    #[test]
    fn test_task_back_to_deliverable() {
        let deliverable = sample();
        let back = Deliverable::try_from(Task::from(deliverable.clone())).unwrap();
        assert_eq!(back, deliverable);
    }

    #[test]
    fn test_multi_assignee_rejected() {
        let mut task = Task::with_id("t", "Shared");
        task.assigned_to = vec![
            UserRef::new("u1", "A", "a@example.com"),
            UserRef::new("u2", "B", "b@example.com"),
        ];
        assert!(Deliverable::try_from(task).is_err());
    }

    #[test]
    fn test_third_level_rejected() {
        let task = Task::with_id("a", "A").with_children(vec![
            Task::with_id("b", "B").with_children(vec![Task::with_id("c", "C")]),
        ]);
        assert!(Deliverable::try_from(task).is_err());
    }
}
