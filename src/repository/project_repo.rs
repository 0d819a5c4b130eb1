//! Project Repository
//!
//! Persists whole project documents, task tree included. Every tree edit is
//! written back as the complete document; there is no field-level update.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{DomainError, DomainResult, Project};
use crate::tree::audit_unique_ids;
use super::document::{from_document, to_document};
use super::traits::{DocumentStore, Repository, SearchableRepository};

/// Document-store implementation of the Project repository
pub struct ProjectRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl ProjectRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl Repository<Project> for ProjectRepository {
    async fn create(&self, entity: &Project) -> DomainResult<Project> {
        audit_unique_ids(&entity.tasks)?;

        let id = self.store.insert(&self.collection, to_document(entity)).await?;
        log::info!("Created project {} ({})", id, entity.internal_id);

        let mut created = entity.clone();
        created.id = id;
        Ok(created)
    }

    async fn find_by_id(&self, id: String) -> DomainResult<Option<Project>> {
        match self.store.get_by_id(&self.collection, &id).await? {
            Some(doc) => Ok(Some(from_document(&doc.id, &doc.body)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Project>> {
        let docs = self.store.list(&self.collection).await?;

        let mut projects = Vec::with_capacity(docs.len());
        for doc in docs {
            match from_document(&doc.id, &doc.body) {
                Ok(project) => projects.push(project),
                // One unreadable document must not hide the rest
                Err(e) => log::warn!("Skipping document {}: {}", doc.id, e),
            }
        }
        Ok(projects)
    }

    async fn update(&self, entity: &Project) -> DomainResult<Project> {
        if !entity.is_persisted() {
            return Err(DomainError::InvalidInput("Cannot update a project without an id".to_string()));
        }
        audit_unique_ids(&entity.tasks)?;

        self.store
            .replace(&self.collection, &entity.id, to_document(entity))
            .await?;
        log::debug!("Wrote project {} ({} tasks)", entity.id, entity.task_count());
        Ok(entity.clone())
    }

    async fn delete(&self, id: String) -> DomainResult<()> {
        self.store.delete(&self.collection, &id).await?;
        log::info!("Deleted project {}", id);
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Project> for ProjectRepository {
    /// Case-insensitive match on name, internal id or customer name
    async fn search(&self, query: &str) -> DomainResult<Vec<Project>> {
        let needle = query.trim().to_lowercase();
        let projects = self.list().await?;
        if needle.is_empty() {
            return Ok(projects);
        }

        Ok(projects
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.internal_id.to_lowercase().contains(&needle)
                    || p.customer.name.to_lowercase().contains(&needle)
            })
            .collect())
    }
}
