//! Table Session Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One seating period for a table, from QR scan to checkout or manual close.
///
/// At most one session per table may have `is_active = true`; `open` is
/// idempotent and `close` uses an equality-filtered update so a racing close
/// resolves to a benign already-closed outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSession {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub table_number: i32,
    pub is_active: bool,
    /// RFC3339 timestamp
    pub started_at: String,
    #[serde(default)]
    pub ended_at: Option<String>,
}
