use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{AdminCache, JwtService};
use crate::core::Config;
use crate::db::DbService;

/// Server state: shared handles for every request
///
/// Cloning is cheap (Arc/handle copies); a clone is handed to each handler
/// via axum's `State` extractor.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Admin-status cache (one membership lookup per user id)
    pub admin_cache: Arc<AdminCache>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
            admin_cache: Arc::new(AdminCache::new()),
        }
    }

    /// Initialize server state: working directory, then database
    ///
    /// # Panics
    ///
    /// Panics when the working directory or database cannot be initialized;
    /// there is nothing to serve without them.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("tabletap.db");
        let db_service = DbService::new(&db_path)
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.db)
    }
}
