//! Admin-Status Cache
//!
//! Caches admin-membership lookups per user id. The first call for a user
//! queries the `admin_member` table once; the (possibly negative) result is
//! cached for the process lifetime and invalidated wholesale on sign-out.

use crate::db::repository::{RepoResult, UserRepository};
use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Debug)]
pub struct AdminCache {
    entries: DashMap<String, bool>,
}

impl AdminCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Whether the user is an admin, consulting the store at most once per
    /// user id between invalidations.
    pub async fn is_admin(&self, db: &Surreal<Db>, user_id: &str) -> RepoResult<bool> {
        if let Some(cached) = self.entries.get(user_id) {
            return Ok(*cached);
        }

        let is_admin = UserRepository::new(db.clone())
            .is_admin_member(user_id)
            .await?;
        self.entries.insert(user_id.to_string(), is_admin);
        Ok(is_admin)
    }

    /// Drop every cached entry (sign-out path)
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AdminCache {
    fn default() -> Self {
        Self::new()
    }
}
