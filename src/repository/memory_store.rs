//! In-Memory Document Store
//!
//! Keeps collections in process memory. Used for tests and the `memory`
//! backend.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::{DomainError, DomainResult};
use super::traits::{ensure_object, generate_document_id, Document, DocumentStore};

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str) -> DomainResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> DomainResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn insert(&self, collection: &str, body: Value) -> DomainResult<String> {
        ensure_object(&body)?;
        let id = generate_document_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document { id: id.clone(), body });
        Ok(id)
    }

    async fn replace(&self, collection: &str, id: &str, body: Value) -> DomainResult<()> {
        ensure_object(&body)?;
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| DomainError::NotFound(format!("Document {}/{}", collection, id)))?;
        doc.body = body;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| DomainError::NotFound(format!("Document {}/{}", collection, id)))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(DomainError::NotFound(format!("Document {}/{}", collection, id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryDocumentStore::new();
        let id = store.insert("projects", json!({"name": "A"})).await.unwrap();

        let doc = store.get_by_id("projects", &id).await.unwrap().unwrap();
        assert_eq!(doc.body["name"], "A");
        assert!(store.get_by_id("other", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryDocumentStore::new();
        let first = store.insert("projects", json!({"n": 1})).await.unwrap();
        let second = store.insert("projects", json!({"n": 2})).await.unwrap();

        let ids: Vec<String> = store.list("projects").await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn test_rejects_non_object_body() {
        let store = MemoryDocumentStore::new();
        assert!(matches!(
            store.insert("projects", json!([1, 2])).await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_replace_and_delete_missing() {
        let store = MemoryDocumentStore::new();
        assert!(matches!(
            store.replace("projects", "nope", json!({})).await,
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(store.delete("projects", "nope").await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_replace_overwrites_whole_body() {
        let store = MemoryDocumentStore::new();
        let id = store.insert("projects", json!({"a": 1, "b": 2})).await.unwrap();
        store.replace("projects", &id, json!({"a": 3})).await.unwrap();

        let doc = store.get_by_id("projects", &id).await.unwrap().unwrap();
        assert_eq!(doc.body, json!({"a": 3}));
    }
}
