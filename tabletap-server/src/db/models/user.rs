//! User Account and Admin Membership Models

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Staff account with argon2-hashed password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub username: String,
    pub password_hash: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// RFC3339 timestamp
    pub created_at: String,
}

fn default_true() -> bool {
    true
}

impl UserAccount {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// Admin membership row
///
/// Membership is a separate table rather than a flag on the account so the
/// admin-status cache performs a real (possibly negative) lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMember {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = UserAccount::hash_password("hunter2").unwrap();
        let account = UserAccount {
            id: None,
            username: "staff".to_string(),
            password_hash: hash,
            is_active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        assert!(account.verify_password("hunter2").unwrap());
        assert!(!account.verify_password("wrong").unwrap());
    }
}
