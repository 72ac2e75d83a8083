//! Shared types for TableTap
//!
//! Common types used by the server and any client crate: the unified error
//! system and the client-facing auth DTOs.

pub mod client;
pub mod error;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
