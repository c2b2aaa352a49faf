//! Session context
//!
//! The signed-in staff member's store and role, loaded once and passed down
//! explicitly instead of being read from ambient storage at each call site.

use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role, ordered from least to most privileged
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only dashboards
    Viewer,
    /// Takes and edits orders
    #[default]
    Cashier,
    /// Menus, vouchers, staff
    Manager,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Cashier => "cashier",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viewer" => Ok(Role::Viewer),
            "cashier" | "staff" => Ok(Role::Cashier),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::invalid_format(format!("unknown role: {}", other))
                .with_detail("role", other.to_string())),
        }
    }
}

/// Signed-in session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SessionContext {
    /// Store the catalog is scoped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl SessionContext {
    pub fn new(store_id: Option<String>, role: Role) -> Self {
        Self { store_id, role }
    }

    /// Fails unless the session's role is at least `required`
    pub fn require_role(&self, required: Role) -> AppResult<()> {
        if self.role >= required {
            return Ok(());
        }
        Err(AppError::with_message(
            ErrorCode::RoleRequired,
            format!("{} role required, signed in as {}", required, self.role),
        )
        .with_detail("required", required.as_str())
        .with_detail("actual", self.role.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" staff ".parse::<Role>().unwrap(), Role::Cashier);
        let err = "owner".parse::<Role>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_require_role() {
        let session = SessionContext::new(Some("store-1".to_string()), Role::Cashier);
        assert!(session.require_role(Role::Viewer).is_ok());
        assert!(session.require_role(Role::Cashier).is_ok());

        let err = session.require_role(Role::Manager).unwrap_err();
        assert_eq!(err.code, ErrorCode::RoleRequired);
        assert_eq!(err.message, "manager role required, signed in as cashier");
    }
}
