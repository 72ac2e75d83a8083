//! Table Session Repository
//!
//! Session lifecycle: `open` is idempotent per table, `close` locates the
//! active session and deactivates it with an equality-filtered update so a
//! racing close resolves to already-closed rather than an error.

use super::{BaseRepository, DiningTableRepository, RepoError, RepoResult};
use crate::db::models::{TableSession, TableStatus};
use shared::ErrorCode;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "table_session";

#[derive(Clone)]
pub struct SessionRepository {
    base: BaseRepository,
    tables: DiningTableRepository,
}

impl SessionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            tables: DiningTableRepository::new(db.clone()),
            base: BaseRepository::new(db),
        }
    }

    /// List sessions, ordered by table number
    pub async fn find_all(&self, active_only: bool) -> RepoResult<Vec<TableSession>> {
        let query = if active_only {
            "SELECT * FROM table_session WHERE is_active = true ORDER BY table_number"
        } else {
            "SELECT * FROM table_session ORDER BY table_number"
        };
        let sessions: Vec<TableSession> = self.base.db().query(query).await?.take(0)?;
        Ok(sessions)
    }

    /// Find session by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TableSession>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let session: Option<TableSession> = self.base.db().select(thing).await?;
        Ok(session)
    }

    /// Find the active session for a table, if any
    pub async fn find_active_by_table(&self, table_number: i32) -> RepoResult<Option<TableSession>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM table_session WHERE table_number = $n AND is_active = true LIMIT 1")
            .bind(("n", table_number))
            .await?;
        let sessions: Vec<TableSession> = result.take(0)?;
        Ok(sessions.into_iter().next())
    }

    /// Open a session for a table (idempotent)
    ///
    /// Returns the existing active session when there is one; otherwise
    /// creates a new session and marks the table Occupied.
    pub async fn open(&self, table_number: i32) -> RepoResult<TableSession> {
        let table = self
            .tables
            .find_by_number(table_number)
            .await?
            .ok_or_else(|| {
                RepoError::Business(
                    ErrorCode::TableNotFound,
                    format!("Table {} not found", table_number),
                )
            })?;

        if let Some(existing) = self.find_active_by_table(table_number).await? {
            return Ok(existing);
        }

        let session = TableSession {
            id: None,
            table_number,
            is_active: true,
            started_at: chrono::Utc::now().to_rfc3339(),
            ended_at: None,
        };
        let created: Option<TableSession> = self.base.db().create(TABLE).content(session).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create session".to_string()))?;

        self.tables
            .set_status(table.table_number, TableStatus::Occupied)
            .await?;

        tracing::info!(table_number, session = ?created.id, "Session opened");
        Ok(created)
    }

    /// Close the active session for a table
    ///
    /// No active session at all is a NotFound failure with no state change.
    /// A close that loses the race on the equality-filtered update is benign:
    /// the session is already inactive and only the table release remains.
    pub async fn close(&self, table_number: i32) -> RepoResult<TableSession> {
        let session = self
            .find_active_by_table(table_number)
            .await?
            .ok_or_else(|| {
                RepoError::Business(
                    ErrorCode::SessionNotFound,
                    format!("No active session for table {}", table_number),
                )
            })?;

        let id = session
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Session row has no id".to_string()))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE table_session SET is_active = false, ended_at = $now \
                 WHERE id = $id AND is_active = true RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("now", chrono::Utc::now().to_rfc3339()))
            .await?;
        let updated: Vec<TableSession> = result.take(0)?;

        if updated.is_empty() {
            // Lost the race with a concurrent close; already inactive.
            tracing::debug!(table_number, "Session already closed");
        }

        self.tables
            .set_status(table_number, TableStatus::Available)
            .await?;

        match updated.into_iter().next() {
            Some(s) => Ok(s),
            None => self
                .find_by_id(&id.to_string())
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Session {} not found", id))),
        }
    }
}
