//! DuckDB-backed storage for saved events.

use crate::models::{NewEvent, StoredEvent};
use duckdb::{Connection, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

const SCHEMA: &str = r#"
CREATE SEQUENCE IF NOT EXISTS events_id_seq START 1;

CREATE TABLE IF NOT EXISTS events (
    id BIGINT PRIMARY KEY,
    event_id TEXT NOT NULL,
    name TEXT NOT NULL,
    "date" TEXT,
    venue TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("Database connection is unavailable")]
    Poisoned,

    #[error("Database worker pool is unavailable")]
    WorkerUnavailable,
}

impl StoreError {
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Validation(message) => message.clone(),
            StoreError::Database(_) | StoreError::Poisoned | StoreError::WorkerUnavailable => {
                "Failed to access the event database".to_string()
            }
        }
    }
}

/// Saved events, shared across workers.
///
/// Calls block on DuckDB; run them off the async executor.
#[derive(Clone)]
pub struct EventStore {
    connection: Arc<Mutex<Connection>>,
}

impl EventStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let connection = Connection::open(path)?;
        info!(path = %path.display(), "Opened event database");
        Self::with_connection(connection)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> Result<Self, StoreError> {
        connection.execute_batch(SCHEMA)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Insert an event and return its row id
    pub fn insert(&self, event: &NewEvent) -> Result<i64, StoreError> {
        if event.event_id.trim().is_empty() || event.name.trim().is_empty() {
            return Err(StoreError::Validation(
                "event_id and name are required".to_string(),
            ));
        }

        let connection = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        let id: i64 = connection.query_row("SELECT nextval('events_id_seq')", [], |row| {
            row.get(0)
        })?;
        connection.execute(
            r#"INSERT INTO events (id, event_id, name, "date", venue) VALUES (?, ?, ?, ?, ?)"#,
            params![id, event.event_id, event.name, event.date, event.venue],
        )?;

        info!(id, event_id = %event.event_id, "Stored event");
        Ok(id)
    }

    /// All saved events, newest first
    pub fn list(&self) -> Result<Vec<StoredEvent>, StoreError> {
        let connection = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        let mut statement = connection.prepare(
            r#"SELECT id, event_id, name, "date", venue, CAST(created_at AS TEXT)
               FROM events
               ORDER BY created_at DESC, id DESC"#,
        )?;

        let rows = statement.query_map([], |row| {
            Ok(StoredEvent {
                id: row.get(0)?,
                event_id: row.get(1)?,
                name: row.get(2)?,
                date: row.get(3)?,
                venue: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }
}
