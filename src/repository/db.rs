//! Database Connection and Setup
//!
//! Manages the SQLite connection backing the document store and its
//! migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: Arc<Mutex<Option<Connection>>>,
    pub db_path: PathBuf,
}

impl DbState {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            db_path,
        }
    }

    pub async fn is_ready(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Drop the connection; stores sharing it start failing with `Persistence`
    pub async fn close(&self) {
        let mut guard = self.conn.lock().await;
        *guard = None;
    }
}

fn is_in_memory(db_path: &Path) -> bool {
    db_path == Path::new(":memory:")
}

/// Open (creating if needed) the database at `db_path` and migrate it
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = if is_in_memory(db_path) {
        Connection::open_in_memory()
    } else {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DomainError::Persistence(format!("Failed to create {}: {}", parent.display(), e)))?;
            }
        }
        Connection::open(db_path)
    }
    .map_err(|e| DomainError::Persistence(format!("Failed to open db: {}", e)))?;

    run_migrations(&conn)?;
    log::debug!("Database ready at {}", db_path.display());

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            body TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            UNIQUE(collection, id)
        )",
        [],
    )
    .map_err(|e| DomainError::Persistence(e.to_string()))?;

    if !column_exists(conn, "documents", "updated_at") {
        conn.execute("ALTER TABLE documents ADD COLUMN updated_at INTEGER", [])
            .map_err(|e| DomainError::Persistence(format!("Failed to add updated_at: {}", e)))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection)",
        [],
    )
    .map_err(|e| DomainError::Persistence(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_in_memory() {
        let state = init_db(Path::new(":memory:")).await.unwrap();
        assert!(state.is_ready().await);

        let guard = state.conn.lock().await;
        let conn = guard.as_ref().unwrap();
        assert!(column_exists(conn, "documents", "updated_at"));
        assert!(!column_exists(conn, "documents", "missing"));
    }

    #[tokio::test]
    async fn test_migrations_are_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("projects.db");

        init_db(&path).await.unwrap().close().await;
        let reopened = init_db(&path).await.unwrap();
        assert!(reopened.is_ready().await);
    }

    #[tokio::test]
    async fn test_close_drops_connection() {
        let state = init_db(Path::new(":memory:")).await.unwrap();
        state.close().await;
        assert!(!state.is_ready().await);
    }
}
