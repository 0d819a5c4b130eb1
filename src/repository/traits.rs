//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DomainError, DomainResult, Entity};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity, returning it with its assigned id
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Replace an existing entity as a whole
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Extension for repositories that support text search
#[async_trait]
pub trait SearchableRepository<T: Entity>: Repository<T> {
    /// Search entities by text query
    async fn search(&self, query: &str) -> DomainResult<Vec<T>>;
}

/// A stored document and its store-assigned key
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

/// Keyed, schema-less document collections
///
/// Bodies are JSON objects. Ordering of `list` is insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(&self, collection: &str) -> DomainResult<Vec<Document>>;

    async fn get_by_id(&self, collection: &str, id: &str) -> DomainResult<Option<Document>>;

    /// Store a new document and return its generated id
    async fn insert(&self, collection: &str, body: Value) -> DomainResult<String>;

    /// Overwrite the whole body of an existing document
    async fn replace(&self, collection: &str, id: &str, body: Value) -> DomainResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()>;
}

pub(crate) fn ensure_object(body: &Value) -> DomainResult<()> {
    if body.is_object() {
        Ok(())
    } else {
        Err(DomainError::InvalidInput("Document body must be a JSON object".to_string()))
    }
}

pub(crate) fn generate_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
