//! Unified error codes for the order desk
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values so the front-end toast layer can map them
/// without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 2xxx: Permission ====================
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 4xxx: Order ====================
    /// Order document could not be read
    OrderNotFound = 4001,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    ConfigError = 9005,
    /// No async runtime available for timers
    RuntimeUnavailable = 9101,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidFormat => "Invalid format",

            ErrorCode::RoleRequired => "Specific role is required",

            ErrorCode::OrderNotFound => "Order not found",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::RuntimeUnavailable => "Async runtime is not available",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(ErrorCode::InvalidFormat),

            2002 => Ok(ErrorCode::RoleRequired),

            4001 => Ok(ErrorCode::OrderNotFound),

            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::RuntimeUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
