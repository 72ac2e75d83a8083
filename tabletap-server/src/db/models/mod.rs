//! Database Models
//!
//! Entity structs stored in the embedded database. Record ids use
//! [`surrealdb::RecordId`] serialized as "table:id" strings.

pub mod serde_helpers;

pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod session;
pub mod transaction;
pub mod user;

pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuTranslation};
pub use order::{items_total, Order, OrderItem, OrderStatus};
pub use session::TableSession;
pub use transaction::PaymentTransaction;
pub use user::{AdminMember, UserAccount};
