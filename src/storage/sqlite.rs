use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;

use crate::{
    domain::ticket::{Ticket, TicketCategory, TicketId, TicketStatus},
    error::Result,
    storage::TicketRepository,
};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tickets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT,
    category    INTEGER NOT NULL,
    status      INTEGER NOT NULL,
    created_at  TEXT NOT NULL
);
";

/// SQLite-backed ticket repository.
///
/// The connection sits behind an async mutex; each call is one short
/// statement, so the store's own transaction semantics serialize requests.
pub struct SqliteTicketRepository {
    conn: Mutex<Connection>,
}

impl SqliteTicketRepository {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    let id: i64 = row.get(0)?;
    let category = TicketCategory::from_code(row.get(3)?)
        .map_err(|e| conversion_failure(3, rusqlite::types::Type::Integer, e))?;
    let status = TicketStatus::from_code(row.get(4)?)
        .map_err(|e| conversion_failure(4, rusqlite::types::Type::Integer, e))?;
    let raw_created_at: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&raw_created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            conversion_failure(
                5,
                rusqlite::types::Type::Text,
                crate::error::BoardError::InvalidTimestamp(raw_created_at),
            )
        })?;

    Ok(Ticket {
        id: TicketId::new(id),
        name: row.get(1)?,
        description: row.get(2)?,
        category,
        status,
        created_at,
    })
}

fn conversion_failure(
    column: usize,
    kind: rusqlite::types::Type,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, kind, Box::new(err))
}

const SELECT_COLUMNS: &str = "id, name, description, category, status, created_at";

#[async_trait]
impl TicketRepository for SqliteTicketRepository {
    async fn list_all(&self) -> Result<Vec<Ticket>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM tickets ORDER BY status ASC, created_at DESC"
        ))?;
        let tickets = stmt
            .query_map([], ticket_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tickets)
    }

    async fn get_by_id(&self, id: TicketId) -> Result<Option<Ticket>> {
        let conn = self.conn.lock().await;
        let ticket = conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM tickets WHERE id = ?1"),
                params![id.get()],
                ticket_from_row,
            )
            .optional()?;
        Ok(ticket)
    }

    async fn insert(&self, ticket: Ticket) -> Result<Ticket> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO tickets (name, description, category, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                ticket.name,
                ticket.description,
                ticket.category.code(),
                ticket.status.code(),
                ticket.created_at.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Ticket {
            id: TicketId::new(id),
            ..ticket
        })
    }

    async fn replace(&self, ticket: Ticket) -> Result<Option<Ticket>> {
        let conn = self.conn.lock().await;
        // created_at deliberately left out of the SET list: the stored
        // creation time survives whatever the replacement record carries.
        let changed = conn.execute(
            "UPDATE tickets SET name = ?1, description = ?2, category = ?3, status = ?4
             WHERE id = ?5",
            params![
                ticket.name,
                ticket.description,
                ticket.category.code(),
                ticket.status.code(),
                ticket.id.get(),
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let updated = conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM tickets WHERE id = ?1"),
                params![ticket.id.get()],
                ticket_from_row,
            )
            .optional()?;
        Ok(updated)
    }

    async fn remove(&self, id: TicketId) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM tickets WHERE id = ?1", params![id.get()])?;
        Ok(changed > 0)
    }

    async fn exists(&self, id: TicketId) -> Result<bool> {
        let conn = self.conn.lock().await;
        let found: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM tickets WHERE id = ?1)",
            params![id.get()],
            |row| row.get(0),
        )?;
        Ok(found)
    }
}
