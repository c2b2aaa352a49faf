//! Unified error system for the order desk
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`AppError`]: Error type with code, message, and details
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::OrderNotFound);
//! assert_eq!(err.code.code(), 4001);
//!
//! let err = AppError::config("invalid timeout").with_detail("key", "UNDO_TIMEOUT_MS");
//! assert_eq!(err.code, ErrorCode::ConfigError);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
