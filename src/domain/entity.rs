//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    /// A project (or other top-level document) is absent
    NotFound(String),
    /// A tree path did not resolve to a node
    NodeNotFound(String),
    InvalidInput(String),
    /// Identifier collisions and other data-integrity violations
    Conflict(String),
    /// The backing store rejected the call or is unreachable
    Persistence(String),
    Unauthenticated,
    Internal(String),
}

impl DomainError {
    /// Errors raised because the caller asked for an edit that cannot apply
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, DomainError::NodeNotFound(_) | DomainError::InvalidInput(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_) | DomainError::NodeNotFound(_))
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::NodeNotFound(msg) => write!(f, "Node not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Persistence(msg) => write!(f, "Persistence failure: {}", msg),
            DomainError::Unauthenticated => write!(f, "No authenticated user"),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::NodeNotFound("task:a/task:z".to_string()).to_string(),
            "Node not found: task:a/task:z"
        );
        assert_eq!(DomainError::Unauthenticated.to_string(), "No authenticated user");
    }

    #[test]
    fn test_error_classification() {
        assert!(DomainError::NodeNotFound("x".into()).is_validation_failure());
        assert!(DomainError::InvalidInput("x".into()).is_validation_failure());
        assert!(!DomainError::Persistence("x".into()).is_validation_failure());
        assert!(DomainError::NotFound("p1".into()).is_not_found());
        assert!(!DomainError::Conflict("dup".into()).is_not_found());
    }
}
