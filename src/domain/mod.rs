//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies.

mod entity;
mod legacy;
mod path;
mod project;
pub(crate) mod serde_ext;
mod task;

pub use entity::{Entity, DomainError, DomainResult};
pub use legacy::{Deliverable, SubTask};
pub use path::{NodeKind, PathSegment, TaskPath};
pub use project::{Customer, NewProject, Project, ProjectKind};
pub use task::{generate_task_id, NewTask, Task, TaskPatch, UserRef};
