//! Order Desk - client-side order core for the store back office
//!
//! # Modules
//!
//! ```text
//! order-desk/src/
//! ├── core/      # configuration
//! ├── pricing/   # line subtotals, order totals, currency display
//! ├── cart/      # optimistic removal with undo, notifier and timer seams
//! ├── report.rs  # order document -> totals report
//! └── utils/     # logging, error re-exports
//! ```

pub mod cart;
pub mod core;
pub mod pricing;
pub mod report;
pub mod utils;

// Re-export public types
pub use cart::{MutatorConfig, OptimisticListMutator};
pub use crate::core::Config;
pub use report::{OrderDocument, TotalsReport};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read and validate configuration, start logging
pub fn setup_environment() -> AppResult<Config> {
    // Missing .env is normal outside development
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    config.validate()?;

    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}
