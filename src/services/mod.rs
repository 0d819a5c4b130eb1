//! Service Layer
//!
//! Project store with its cache and error policy, task-tree edits and the
//! per-user task aggregation.

mod assigned;
mod auth;
mod project_store;
mod task_ops;


pub use assigned::{collect_assigned, AssignedTask, AssignedTaskOperations};
pub use auth::{AuthProvider, SessionAuth};
pub use project_store::{ProjectSnapshot, ProjectStore};
pub use task_ops::ProjectTaskOperations;
