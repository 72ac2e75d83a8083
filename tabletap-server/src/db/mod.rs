//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend) plus the repository layer.

pub mod models;
pub mod repository;

use shared::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "tabletap";
const DATABASE: &str = "main";

/// Database service owning the embedded database handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the database at the given path and apply schema definitions
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!(path = %db_path.display(), "Database ready (SurrealDB/RocksDB)");
        Ok(Self { db })
    }
}

/// Apply index definitions
///
/// Tables are schemaless; the indexes back the uniqueness invariants
/// (one row per table number, one account per username).
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "DEFINE INDEX IF NOT EXISTS uniq_table_number ON TABLE dining_table FIELDS table_number UNIQUE;
         DEFINE INDEX IF NOT EXISTS uniq_username ON TABLE user_account FIELDS username UNIQUE;
         DEFINE INDEX IF NOT EXISTS session_by_table ON TABLE table_session FIELDS table_number;
         DEFINE INDEX IF NOT EXISTS order_by_session ON TABLE food_order FIELDS session;",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
