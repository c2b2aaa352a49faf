//! Order-Level Price Calculator
//!
//! Aggregates line subtotals and applies the order's shipping fee and
//! discount. The final total is deliberately left unclamped: a discount
//! larger than subtotal plus shipping produces a negative total.

use rust_decimal::prelude::*;
use shared::order::{CatalogPriceMap, LineItem, OrderCharges, OrderTotals};

use super::item_calculator::{finite_or_zero, line_subtotal, line_subtotal_decimal, to_decimal, to_f64};

/// Calculate order totals
///
/// # Calculation Steps
/// 1. subtotal = sum of line subtotals (zero for an empty list)
/// 2. final = subtotal + shipping_fee - total_discount (missing charges are zero)
///
/// Each step runs in Decimal and drops to f64 only when its amounts leave
/// Decimal's range.
pub fn compute_totals(
    items: &[LineItem],
    charges: &OrderCharges,
    catalog: &CatalogPriceMap,
) -> OrderTotals {
    let shipping = charges.shipping_fee.map(finite_or_zero).unwrap_or(0.0);
    let discount = charges.total_discount.map(finite_or_zero).unwrap_or(0.0);

    let subtotal_decimal = items.iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line_subtotal_decimal(line, catalog)?)
    });
    let final_decimal = subtotal_decimal.and_then(|subtotal| {
        subtotal
            .checked_add(to_decimal(shipping)?)?
            .checked_sub(to_decimal(discount)?)
    });

    let subtotal_price = match subtotal_decimal {
        Some(subtotal) => to_f64(subtotal),
        None => items.iter().map(|line| line_subtotal(line, catalog)).sum(),
    };
    let final_total = match final_decimal {
        Some(total) => to_f64(total),
        None => {
            tracing::debug!("Order total outside Decimal range, using f64");
            subtotal_price + shipping - discount
        }
    };

    tracing::trace!(
        lines = items.len(),
        subtotal = subtotal_price,
        shipping,
        discount,
        final_total,
        "Computed order totals"
    );

    OrderTotals {
        subtotal_price,
        final_total,
    }
}

// ==================== Tests ====================
