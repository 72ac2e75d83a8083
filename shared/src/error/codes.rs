//! Unified error codes for TableTap
//!
//! Error codes are shared between the server and its clients so that a
//! frontend can branch on the code rather than on message text. Codes are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication / permission errors
//! - 2xxx: Table errors
//! - 3xxx: Session errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / transaction errors
//! - 6xxx: Menu errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values for efficient serialization and
/// cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Password confirmation does not match
    PasswordMismatch = 1006,
    /// Admin membership required
    AdminRequired = 1007,
    /// Username is already taken
    UsernameExists = 1008,

    // ==================== 2xxx: Table ====================
    /// Table not found
    TableNotFound = 2001,
    /// Table number already exists
    TableNumberExists = 2002,
    /// Table number must be positive
    InvalidTableNumber = 2003,

    // ==================== 3xxx: Session ====================
    /// No active session for the table
    SessionNotFound = 3001,
    /// Session has already been closed
    SessionClosed = 3002,
    /// Session does not belong to the given table
    SessionTableMismatch = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order must contain at least one item
    EmptyOrder = 4002,
    /// Target order status is not allowed from the current status
    InvalidStatusTransition = 4003,
    /// Order is in a terminal state and cannot be modified
    OrderFinalized = 4004,
    /// Item quantity must be positive
    InvalidQuantity = 4005,

    // ==================== 5xxx: Payment ====================
    /// Transaction not found
    TransactionNotFound = 5001,
    /// Cannot check out a session with no orders
    EmptyCheckout = 5002,
    /// Session total does not match the sum of its orders
    TotalMismatch = 5003,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::NotAuthenticated => "Not authenticated",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Token is invalid",
            Self::AccountDisabled => "Account has been disabled",
            Self::PasswordMismatch => "Password confirmation does not match",
            Self::AdminRequired => "Admin membership required",
            Self::UsernameExists => "Username is already taken",

            Self::TableNotFound => "Table not found",
            Self::TableNumberExists => "Table number already exists",
            Self::InvalidTableNumber => "Table number must be positive",

            Self::SessionNotFound => "No active session for this table",
            Self::SessionClosed => "Session has already been closed",
            Self::SessionTableMismatch => "Session does not belong to this table",

            Self::OrderNotFound => "Order not found",
            Self::EmptyOrder => "Order must contain at least one item",
            Self::InvalidStatusTransition => "Status transition not allowed",
            Self::OrderFinalized => "Order can no longer be modified",
            Self::InvalidQuantity => "Item quantity must be positive",

            Self::TransactionNotFound => "Transaction not found",
            Self::EmptyCheckout => "Session has no orders to check out",
            Self::TotalMismatch => "Session total does not match its orders",

            Self::MenuItemNotFound => "Menu item not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when deserializing an unknown error code value
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::AccountDisabled,
            1006 => Self::PasswordMismatch,
            1007 => Self::AdminRequired,
            1008 => Self::UsernameExists,

            2001 => Self::TableNotFound,
            2002 => Self::TableNumberExists,
            2003 => Self::InvalidTableNumber,

            3001 => Self::SessionNotFound,
            3002 => Self::SessionClosed,
            3003 => Self::SessionTableMismatch,

            4001 => Self::OrderNotFound,
            4002 => Self::EmptyOrder,
            4003 => Self::InvalidStatusTransition,
            4004 => Self::OrderFinalized,
            4005 => Self::InvalidQuantity,

            5001 => Self::TransactionNotFound,
            5002 => Self::EmptyCheckout,
            5003 => Self::TotalMismatch,

            6001 => Self::MenuItemNotFound,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_through_u16() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::SessionNotFound,
            ErrorCode::InvalidStatusTransition,
            ErrorCode::DatabaseError,
        ];
        for code in codes {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value).unwrap(), code);
        }
    }

    #[test]
    fn unknown_value_is_rejected() {
        assert!(ErrorCode::try_from(7777).is_err());
    }
}
