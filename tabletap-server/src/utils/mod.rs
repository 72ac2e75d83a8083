//! Utility Module

pub mod logger;

// Re-export error types from shared for handler signatures
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
