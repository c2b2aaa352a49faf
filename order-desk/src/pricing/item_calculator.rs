//! Item Price Calculator
//!
//! Line-level prices: catalog unit price (with snapshot fallback) plus
//! add-ons, multiplied by quantity.
//!
//! Uses rust_decimal for precision calculations. Missing or unusable data
//! prices as zero instead of failing, so a catalog miss never breaks
//! rendering of an order. Amounts beyond Decimal's range fall back to plain
//! f64 arithmetic rather than overflowing.

use rust_decimal::prelude::*;
use shared::order::{CatalogPriceMap, LineItem};

// ==================== Conversion Helpers ====================

/// Convert f64 to Decimal for calculation
///
/// `None` for NaN, infinities and magnitudes outside Decimal's range.
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Convert Decimal back to f64 for display and serialization
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// NaN and infinities count as zero
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

// ==================== Unit Price ====================

/// Resolve the current unit price of a dish
///
/// Live catalog price when the dish is listed with a price, otherwise the
/// fallback (the snapshot taken at order time), otherwise zero.
pub fn resolve_unit_price(
    dish_id: &str,
    catalog: &CatalogPriceMap,
    fallback_price: Option<f64>,
) -> f64 {
    catalog
        .get(dish_id)
        .and_then(|entry| entry.price)
        .or(fallback_price)
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

// ==================== Line Subtotal ====================

/// Line subtotal as Decimal, see [`line_subtotal`]
///
/// `None` when a price or an intermediate result does not fit in Decimal.
pub fn line_subtotal_decimal(line: &LineItem, catalog: &CatalogPriceMap) -> Option<Decimal> {
    if line.quantity <= 0 {
        return Some(Decimal::ZERO);
    }

    let unit = to_decimal(resolve_unit_price(
        &line.dish_id,
        catalog,
        line.fallback_price(),
    ))?;
    let toppings = line.toppings.iter().try_fold(Decimal::ZERO, |acc, t| {
        acc.checked_add(to_decimal(finite_or_zero(t.price))?)
    })?;

    Decimal::from(line.quantity).checked_mul(unit.checked_add(toppings)?)
}

fn line_subtotal_f64(line: &LineItem, catalog: &CatalogPriceMap) -> f64 {
    if line.quantity <= 0 {
        return 0.0;
    }
    let unit = resolve_unit_price(&line.dish_id, catalog, line.fallback_price());
    let toppings: f64 = line.toppings.iter().map(|t| finite_or_zero(t.price)).sum();
    f64::from(line.quantity) * (unit + toppings)
}

/// Calculate a line's subtotal
///
/// `quantity * (unit_price + sum(topping prices))`. A line with no toppings
/// contributes only its unit price; a zero or negative quantity yields zero.
pub fn line_subtotal(line: &LineItem, catalog: &CatalogPriceMap) -> f64 {
    match line_subtotal_decimal(line, catalog) {
        Some(subtotal) => to_f64(subtotal),
        None => {
            tracing::debug!(line_id = %line.line_id, "Line subtotal outside Decimal range, using f64");
            line_subtotal_f64(line, catalog)
        }
    }
}

// ==================== Tests ====================
