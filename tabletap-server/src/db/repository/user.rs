//! User Account Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AdminMember, UserAccount};
use shared::ErrorCode;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "user_account";
const ADMIN_TABLE: &str = "admin_member";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find account by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserAccount>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user_account WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let users: Vec<UserAccount> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find account by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<UserAccount>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let user: Option<UserAccount> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Create a staff account with admin membership
    pub async fn create_admin(&self, username: &str, password: &str) -> RepoResult<UserAccount> {
        if self.find_by_username(username).await?.is_some() {
            return Err(RepoError::Business(
                ErrorCode::UsernameExists,
                format!("Username '{}' is already taken", username),
            ));
        }

        let password_hash = UserAccount::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {}", e)))?;

        let account = UserAccount {
            id: None,
            username: username.to_string(),
            password_hash,
            is_active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let created: Option<UserAccount> = self.base.db().create(TABLE).content(account).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))?;

        let user_thing = created
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Account row has no id".to_string()))?;
        let membership = AdminMember {
            id: None,
            user: user_thing,
        };
        let _: Option<AdminMember> = self.base.db().create(ADMIN_TABLE).content(membership).await?;

        Ok(created)
    }

    /// Whether the user id has an admin membership row
    ///
    /// The membership link is stored as a "table:id" string, so the filter
    /// binds the normalized string form.
    pub async fn is_admin_member(&self, user_id: &str) -> RepoResult<bool> {
        let user: RecordId = user_id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid user ID: {}", user_id)))?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM admin_member WHERE user = $user LIMIT 1")
            .bind(("user", user.to_string()))
            .await?;
        let rows: Vec<AdminMember> = result.take(0)?;
        Ok(!rows.is_empty())
    }
}
