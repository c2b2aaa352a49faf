//! Order Pricing Module
//!
//! Pure, side-effect-free money calculations for an order's item list:
//! line subtotals, order totals and currency display.

mod currency;
mod item_calculator;
mod order_calculator;

pub use currency::*;
pub use item_calculator::*;
pub use order_calculator::*;
