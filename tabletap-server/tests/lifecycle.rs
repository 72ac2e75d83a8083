//! Table/session/order lifecycle tests against a real embedded database.
//! Run: cargo test -p tabletap-server --test lifecycle

use rust_decimal::Decimal;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tempfile::TempDir;

use shared::ErrorCode;
use tabletap_server::db::define_schema;
use tabletap_server::db::models::{
    DiningTableCreate, OrderItem, OrderStatus, TableStatus,
};
use tabletap_server::db::repository::{
    DiningTableRepository, OrderRepository, RepoError, SessionRepository, TransactionRepository,
};

async fn test_db() -> (Surreal<Db>, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    define_schema(&db).await.unwrap();
    (db, tmp)
}

async fn create_table(db: &Surreal<Db>, table_number: i32) {
    DiningTableRepository::new(db.clone())
        .create(DiningTableCreate {
            table_number,
            section: "main".to_string(),
            capacity: Some(4),
        })
        .await
        .unwrap();
}

fn item(name: &str, price: &str, quantity: i32) -> OrderItem {
    OrderItem {
        menu_item: RecordId::from(("menu_item", name)),
        name: name.to_string(),
        price: price.parse::<Decimal>().unwrap(),
        quantity,
        instructions: None,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn open_session_is_idempotent() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 7).await;
    let sessions = SessionRepository::new(db.clone());

    let first = sessions.open(7).await.unwrap();
    let second = sessions.open(7).await.unwrap();
    assert_eq!(first.id, second.id);

    // Exactly one session row exists for the table
    let all = sessions.find_all(true).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn open_marks_table_occupied() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 3).await;
    let tables = DiningTableRepository::new(db.clone());
    let sessions = SessionRepository::new(db.clone());

    sessions.open(3).await.unwrap();
    let table = tables.find_by_number(3).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
}

#[tokio::test]
async fn open_unknown_table_fails() {
    let (db, _tmp) = test_db().await;
    let sessions = SessionRepository::new(db.clone());

    let err = sessions.open(99).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::TableNotFound, _)));
}

#[tokio::test]
async fn close_without_active_session_is_not_found() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 4).await;
    let sessions = SessionRepository::new(db.clone());
    let tables = DiningTableRepository::new(db.clone());

    let err = sessions.close(4).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::SessionNotFound, _)));

    // No state change
    let table = tables.find_by_number(4).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Available);
    assert!(sessions.find_all(false).await.unwrap().is_empty());
}

#[tokio::test]
async fn close_releases_table_and_stamps_end_time() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 6).await;
    let sessions = SessionRepository::new(db.clone());
    let tables = DiningTableRepository::new(db.clone());

    sessions.open(6).await.unwrap();
    let closed = sessions.close(6).await.unwrap();
    assert!(!closed.is_active);
    assert!(closed.ended_at.is_some());

    let table = tables.find_by_number(6).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Available);

    // A second close finds nothing to do
    let err = sessions.close(6).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::SessionNotFound, _)));
}

#[tokio::test]
async fn order_total_is_sum_of_lines() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 1).await;
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let session = sessions.open(1).await.unwrap();
    let session_id = session.id.unwrap().to_string();

    let order = orders
        .create(
            &session_id,
            1,
            vec![item("burger", "10.00", 2), item("fries", "3.25", 3)],
            None,
        )
        .await
        .unwrap();

    assert_eq!(order.total_amount, dec("29.75"));
    assert_eq!(order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn empty_order_is_rejected_before_any_write() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 2).await;
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let session = sessions.open(2).await.unwrap();
    let session_id = session.id.unwrap().to_string();

    let err = orders.create(&session_id, 2, vec![], None).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::EmptyOrder, _)));
    assert!(orders.find_by_session(&session_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn order_for_closed_session_is_rejected() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 8).await;
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let session = sessions.open(8).await.unwrap();
    let session_id = session.id.unwrap().to_string();
    sessions.close(8).await.unwrap();

    let err = orders
        .create(&session_id, 8, vec![item("tea", "2.00", 1)], None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::SessionClosed, _)));
}

#[tokio::test]
async fn status_whitelist_is_enforced() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 9).await;
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let session = sessions.open(9).await.unwrap();
    let session_id = session.id.unwrap().to_string();
    let order = orders
        .create(&session_id, 9, vec![item("soup", "5.50", 1)], None)
        .await
        .unwrap();
    let order_id = order.id.unwrap().to_string();

    // pending -> completed skips preparing and is rejected
    let err = orders
        .update_status(&order_id, OrderStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::InvalidStatusTransition, _)
    ));

    // The kitchen flow succeeds step by step
    let order = orders
        .update_status(&order_id, OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Preparing);
    let order = orders
        .update_status(&order_id, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Completed);

    // Terminal state rejects further transitions
    let err = orders
        .update_status(&order_id, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::InvalidStatusTransition, _)
    ));
}

#[tokio::test]
async fn replacing_items_recomputes_total() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 11).await;
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let session = sessions.open(11).await.unwrap();
    let session_id = session.id.unwrap().to_string();
    let order = orders
        .create(
            &session_id,
            11,
            vec![item("burger", "10.00", 1), item("cola", "2.50", 2)],
            None,
        )
        .await
        .unwrap();
    let order_id = order.id.unwrap().to_string();
    assert_eq!(order.total_amount, dec("15.00"));

    // Drop one line, keep the other
    let updated = orders
        .replace_items(&order_id, vec![item("burger", "10.00", 1)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.total_amount, dec("10.00"));
    assert_eq!(updated.order_items.len(), 1);
}

#[tokio::test]
async fn deleting_last_item_deletes_the_order() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 12).await;
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let session = sessions.open(12).await.unwrap();
    let session_id = session.id.unwrap().to_string();
    let order = orders
        .create(&session_id, 12, vec![item("tea", "2.00", 1)], None)
        .await
        .unwrap();
    let order_id = order.id.unwrap().to_string();

    let result = orders.replace_items(&order_id, vec![]).await.unwrap();
    assert!(result.is_none());
    assert!(orders.find_by_id(&order_id).await.unwrap().is_none());
    assert!(orders.find_by_session(&session_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_table_number_is_rejected() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 20).await;

    let err = DiningTableRepository::new(db.clone())
        .create(DiningTableCreate {
            table_number: 20,
            section: "patio".to_string(),
            capacity: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::TableNumberExists, _)
    ));
}

#[tokio::test]
async fn checkout_of_empty_session_is_rejected() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 13).await;
    let sessions = SessionRepository::new(db.clone());
    let txs = TransactionRepository::new(db.clone());

    let session = sessions.open(13).await.unwrap();
    let session_id = session.id.unwrap().to_string();

    let err = txs.checkout(&session_id, 13, "cash", None).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::EmptyCheckout, _)));

    // Session stays open
    assert!(sessions.find_active_by_table(13).await.unwrap().is_some());
}

/// The full diner flow: open table 5, order 2×10.00, send to the kitchen,
/// check out with cash.
#[tokio::test]
async fn full_lifecycle_scenario() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 5).await;
    let tables = DiningTableRepository::new(db.clone());
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());
    let txs = TransactionRepository::new(db.clone());

    // Open: table becomes Occupied
    let session = sessions.open(5).await.unwrap();
    let session_id = session.id.clone().unwrap().to_string();
    let table = tables.find_by_number(5).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Occupied);

    // Order 2 × 10.00
    let order = orders
        .create(&session_id, 5, vec![item("special", "10.00", 2)], None)
        .await
        .unwrap();
    assert_eq!(order.total_amount, dec("20.00"));
    assert_eq!(order.status, OrderStatus::Pending);

    // Kitchen picks it up
    let order_id = order.id.unwrap().to_string();
    let order = orders
        .update_status(&order_id, OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Preparing);

    // Checkout with cash
    let tx = txs
        .checkout(&session_id, 5, "cash", Some(dec("20.00")))
        .await
        .unwrap();
    assert_eq!(tx.total_amount, dec("20.00"));
    assert_eq!(tx.payment_method, "cash");
    assert_eq!(tx.order_details.len(), 1);

    // Session closed, table released
    assert!(sessions.find_active_by_table(5).await.unwrap().is_none());
    let table = tables.find_by_number(5).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Available);

    // A second checkout fails: the session is gone
    let err = txs.checkout(&session_id, 5, "cash", None).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::SessionClosed, _)));

    // Payment history shows the transaction
    let history = txs.find_by_table(5).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].total_amount, dec("20.00"));
}

#[tokio::test]
async fn checkout_of_closed_session_records_nothing() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 16).await;
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());
    let txs = TransactionRepository::new(db.clone());

    let session = sessions.open(16).await.unwrap();
    let session_id = session.id.unwrap().to_string();
    orders
        .create(&session_id, 16, vec![item("coffee", "3.00", 2)], None)
        .await
        .unwrap();

    // Staff close the session before the diner's checkout lands
    sessions.close(16).await.unwrap();

    let err = txs.checkout(&session_id, 16, "cash", None).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::SessionClosed, _)));

    // The aborted transaction left no payment behind
    assert!(txs.find_by_table(16).await.unwrap().is_empty());
}

#[tokio::test]
async fn checkout_with_wrong_expected_total_is_rejected() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 15).await;
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());
    let txs = TransactionRepository::new(db.clone());

    let session = sessions.open(15).await.unwrap();
    let session_id = session.id.unwrap().to_string();
    orders
        .create(&session_id, 15, vec![item("salad", "7.00", 1)], None)
        .await
        .unwrap();

    let err = txs
        .checkout(&session_id, 15, "cash", Some(dec("9.99")))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::TotalMismatch, _)));

    // Nothing was recorded and the session stays open
    assert!(txs.find_by_table(15).await.unwrap().is_empty());
    assert!(sessions.find_active_by_table(15).await.unwrap().is_some());
}

#[tokio::test]
async fn cancelled_orders_are_not_charged() {
    let (db, _tmp) = test_db().await;
    create_table(&db, 14).await;
    let sessions = SessionRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());
    let txs = TransactionRepository::new(db.clone());

    let session = sessions.open(14).await.unwrap();
    let session_id = session.id.unwrap().to_string();

    let kept = orders
        .create(&session_id, 14, vec![item("pizza", "12.00", 1)], None)
        .await
        .unwrap();
    let dropped = orders
        .create(&session_id, 14, vec![item("wine", "30.00", 1)], None)
        .await
        .unwrap();
    orders
        .update_status(&dropped.id.unwrap().to_string(), OrderStatus::Cancelled)
        .await
        .unwrap();

    let tx = txs.checkout(&session_id, 14, "card", None).await.unwrap();
    assert_eq!(tx.total_amount, kept.total_amount);
    // The snapshot still records both orders
    assert_eq!(tx.order_details.len(), 2);
}
