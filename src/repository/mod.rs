//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod document;
mod memory_store;
mod sqlite_store;
mod project_repo;


pub use traits::{Document, DocumentStore, Repository, SearchableRepository};
pub use db::{init_db, DbState};
pub use document::{from_document, task_to_document, to_document};
pub use memory_store::MemoryDocumentStore;
pub use sqlite_store::SqliteDocumentStore;
pub use project_repo::ProjectRepository;
