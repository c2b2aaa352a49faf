//! Utilities
//!
//! - [`AppError`] / [`AppResult`] - application error types (from shared::error)
//! - logging setup

pub mod logger;

pub use shared::error::{AppError, AppResult, ErrorCode};
