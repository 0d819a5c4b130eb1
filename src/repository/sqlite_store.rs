//! SQLite Document Store
//!
//! Stores each document as a JSON text row keyed by (collection, id).

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};
use super::traits::{ensure_object, generate_document_id, Document, DocumentStore};

pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl SqliteDocumentStore {
    pub fn new(conn: Arc<Mutex<Option<Connection>>>) -> Self {
        Self { conn }
    }
}

fn not_initialized() -> DomainError {
    DomainError::Persistence("Database not initialized".to_string())
}

fn db_err(e: rusqlite::Error) -> DomainError {
    DomainError::Persistence(e.to_string())
}

fn parse_body(raw: &str) -> DomainResult<Value> {
    serde_json::from_str(raw).map_err(|e| DomainError::Internal(format!("Corrupt document body: {}", e)))
}

fn missing(collection: &str, id: &str) -> DomainError {
    DomainError::NotFound(format!("Document {}/{}", collection, id))
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn list(&self, collection: &str) -> DomainResult<Vec<Document>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare("SELECT id, body FROM documents WHERE collection = ? ORDER BY seq")
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![collection], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(db_err)?;

        let mut docs = Vec::new();
        for row in rows {
            let (id, body) = row.map_err(db_err)?;
            match parse_body(&body) {
                Ok(body) => docs.push(Document { id, body }),
                // A corrupt row must not hide the rest of the collection
                Err(e) => log::warn!("Skipping row {}/{}: {}", collection, id, e),
            }
        }
        Ok(docs)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> DomainResult<Option<Document>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ? AND id = ?",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err)?;

        match body {
            Some(body) => Ok(Some(Document {
                id: id.to_string(),
                body: parse_body(&body)?,
            })),
            None => Ok(None),
        }
    }

    async fn insert(&self, collection: &str, body: Value) -> DomainResult<String> {
        ensure_object(&body)?;
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let id = generate_document_id();
        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO documents (collection, id, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![collection, id, body.to_string(), now, now],
        )
        .map_err(db_err)?;
        Ok(id)
    }

    async fn replace(&self, collection: &str, id: &str, body: Value) -> DomainResult<()> {
        ensure_object(&body)?;
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let now = chrono::Utc::now().timestamp_millis();
        let changed = conn
            .execute(
                "UPDATE documents SET body = ?, updated_at = ? WHERE collection = ? AND id = ?",
                params![body.to_string(), now, collection, id],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(missing(collection, id));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn
            .execute(
                "DELETE FROM documents WHERE collection = ? AND id = ?",
                params![collection, id],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(missing(collection, id));
        }
        Ok(())
    }
}
