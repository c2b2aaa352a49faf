//! Shared types for the order desk
//!
//! Order line model, session context and the error types used across crates.

pub mod error;
pub mod order;
pub mod session;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use session::{Role, SessionContext};
