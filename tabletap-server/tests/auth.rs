//! Account and admin-status cache tests against a real embedded database.
//! Run: cargo test -p tabletap-server --test auth

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tempfile::TempDir;
use tower::ServiceExt;

use shared::ErrorCode;
use tabletap_server::auth::{AdminCache, JwtConfig};
use tabletap_server::db::define_schema;
use tabletap_server::db::repository::{RepoError, UserRepository};
use tabletap_server::{Config, ServerState, build_app};

async fn test_db() -> (Surreal<Db>, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    define_schema(&db).await.unwrap();
    (db, tmp)
}

fn test_state(db: Surreal<Db>) -> ServerState {
    let config = Config {
        work_dir: "/tmp/tabletap-test".to_string(),
        http_port: 0,
        public_base_url: "http://localhost:3000".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-000".to_string(),
            expiration_minutes: 5,
            issuer: "tabletap-server".to_string(),
            audience: "tabletap-clients".to_string(),
        },
        environment: "test".to_string(),
    };
    ServerState::new(config, db)
}

#[tokio::test]
async fn register_then_login_roundtrip() {
    let (db, _tmp) = test_db().await;
    let users = UserRepository::new(db.clone());

    let account = users.create_admin("alice", "correct horse").await.unwrap();
    assert!(account.is_active);

    let found = users.find_by_username("alice").await.unwrap().unwrap();
    assert!(found.verify_password("correct horse").unwrap());
    assert!(!found.verify_password("wrong").unwrap());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let (db, _tmp) = test_db().await;
    let users = UserRepository::new(db.clone());

    users.create_admin("bob", "password123").await.unwrap();
    let err = users.create_admin("bob", "password456").await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::UsernameExists, _)
    ));
}

#[tokio::test]
async fn register_rejects_password_mismatch_before_any_write() {
    let (db, _tmp) = test_db().await;
    let app = build_app(test_state(db.clone()));

    let body = serde_json::json!({
        "username": "dave",
        "password": "password123",
        "password_confirm": "password124",
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["code"], ErrorCode::PasswordMismatch.code());

    // No account row was created
    let users = UserRepository::new(db);
    assert!(users.find_by_username("dave").await.unwrap().is_none());
}

#[tokio::test]
async fn admin_cache_hits_the_store_once_per_user() {
    let (db, _tmp) = test_db().await;
    let users = UserRepository::new(db.clone());
    let cache = AdminCache::new();

    let account = users.create_admin("carol", "password123").await.unwrap();
    let user_id = account.id.unwrap().to_string();

    assert!(cache.is_admin(&db, &user_id).await.unwrap());
    assert_eq!(cache.len(), 1);

    // Remove the membership row behind the cache's back. The cached answer
    // must keep serving without another lookup.
    db.query("DELETE admin_member").await.unwrap();
    assert!(!users.is_admin_member(&user_id).await.unwrap());
    assert!(cache.is_admin(&db, &user_id).await.unwrap());

    // Invalidation forces a fresh lookup, which now sees the removal
    cache.invalidate_all();
    assert!(cache.is_empty());
    assert!(!cache.is_admin(&db, &user_id).await.unwrap());
}

#[tokio::test]
async fn non_member_is_cached_negative() {
    let (db, _tmp) = test_db().await;
    let cache = AdminCache::new();

    // A user id with no membership row at all
    assert!(!cache.is_admin(&db, "user_account:ghost").await.unwrap());
    assert_eq!(cache.len(), 1);

    // The negative answer is served from the cache too
    assert!(!cache.is_admin(&db, "user_account:ghost").await.unwrap());
    assert_eq!(cache.len(), 1);
}
