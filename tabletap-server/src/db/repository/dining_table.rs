//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
use shared::ErrorCode;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tables, ordered by table number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY table_number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by its physical number
    pub async fn find_by_number(&self, table_number: i32) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE table_number = $n LIMIT 1")
            .bind(("n", table_number))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new table, Available by default
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        if data.table_number <= 0 {
            return Err(RepoError::Business(
                ErrorCode::InvalidTableNumber,
                format!("Table number {} must be positive", data.table_number),
            ));
        }
        if self.find_by_number(data.table_number).await?.is_some() {
            return Err(RepoError::Business(
                ErrorCode::TableNumberExists,
                format!("Table {} already exists", data.table_number),
            ));
        }

        let table = DiningTable {
            id: None,
            table_number: data.table_number,
            section: data.section,
            capacity: data.capacity.unwrap_or(4),
            status: TableStatus::Available,
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table".to_string()))
    }

    /// Update a table's mutable fields
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        let section = data.section.unwrap_or(existing.section);
        let capacity = data.capacity.unwrap_or(existing.capacity);
        let status = data.status.unwrap_or(existing.status);

        self.base
            .db()
            .query("UPDATE $thing SET section = $section, capacity = $capacity, status = $status")
            .bind(("thing", thing))
            .bind(("section", section))
            .bind(("capacity", capacity))
            .bind(("status", status))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Flip a table's occupancy status by table number
    pub async fn set_status(&self, table_number: i32, status: TableStatus) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE dining_table SET status = $status WHERE table_number = $n")
            .bind(("status", status))
            .bind(("n", table_number))
            .await?;
        Ok(())
    }

    /// Hard delete a table
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
