use shared::error::{AppError, AppResult};
use shared::order::{MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};
use shared::session::{Role, SessionContext};
use std::time::Duration;

use crate::cart::MutatorConfig;
use crate::pricing::CurrencyFormat;

/// Order desk configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | UNDO_TIMEOUT_MS | 5000 | Undo window after removing a line |
/// | MAX_LINE_QUANTITY | 50 | Upper clamp for a line's quantity |
/// | NOTIFY_MISSING_REMOVAL | false | Toast even when the line is already gone |
/// | CURRENCY_SYMBOL | ₫ | Symbol used when formatting amounts |
/// | STORE_ID | (none) | Store the catalog is scoped to |
/// | STAFF_ROLE | cashier | Role of the signed-in staff member |
/// | LOG_LEVEL | info | tracing max level |
/// | LOG_DIR | (none) | Daily rolling log files when the directory exists |
///
/// Unparseable numbers fall back to their defaults; [`Config::validate`]
/// rejects values that parse but make no sense.
#[derive(Debug, Clone)]
pub struct Config {
    pub undo_timeout_ms: u64,
    pub max_line_quantity: i32,
    pub notify_missing_removal: bool,
    pub currency_symbol: String,
    pub store_id: Option<String>,
    pub staff_role: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup (environment, test maps)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            undo_timeout_ms: lookup("UNDO_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            max_line_quantity: lookup("MAX_LINE_QUANTITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_LINE_QUANTITY),
            notify_missing_removal: lookup("NOTIFY_MISSING_REMOVAL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            currency_symbol: lookup("CURRENCY_SYMBOL").unwrap_or_else(|| "₫".into()),
            store_id: lookup("STORE_ID").filter(|s| !s.is_empty()),
            staff_role: lookup("STAFF_ROLE").unwrap_or_else(|| "cashier".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.undo_timeout_ms == 0 {
            return Err(AppError::config("UNDO_TIMEOUT_MS must be greater than 0")
                .with_detail("key", "UNDO_TIMEOUT_MS"));
        }
        if self.max_line_quantity < MIN_LINE_QUANTITY {
            return Err(AppError::config(format!(
                "MAX_LINE_QUANTITY must be at least {}, got {}",
                MIN_LINE_QUANTITY, self.max_line_quantity
            ))
            .with_detail("key", "MAX_LINE_QUANTITY"));
        }
        self.staff_role.parse::<Role>()?;
        Ok(())
    }

    pub fn undo_timeout(&self) -> Duration {
        Duration::from_millis(self.undo_timeout_ms)
    }

    pub fn mutator_config(&self) -> MutatorConfig {
        MutatorConfig {
            undo_timeout: self.undo_timeout(),
            min_quantity: MIN_LINE_QUANTITY,
            max_quantity: self.max_line_quantity,
            notify_missing_removal: self.notify_missing_removal,
        }
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::vnd().with_symbol(self.currency_symbol.clone())
    }

    /// Session of the signed-in staff member
    pub fn session(&self) -> AppResult<SessionContext> {
        let role = self.staff_role.parse::<Role>()?;
        Ok(SessionContext::new(self.store_id.clone(), role))
    }
}
