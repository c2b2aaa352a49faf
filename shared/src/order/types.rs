//! Shared types for order lines, catalog prices and order charges

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Smallest quantity a line may hold while it is in the list
pub const MIN_LINE_QUANTITY: i32 = 1;
/// Default upper bound for a line's quantity
pub const MAX_LINE_QUANTITY: i32 = 50;

// ============================================================================
// Line Item Types
// ============================================================================

/// Add-on selected for a line (extra cheese, pearls, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Topping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Price of one unit of this add-on
    #[serde(default)]
    pub price: f64,
}

impl Topping {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price,
        }
    }
}

/// Catalog record captured when the line was ordered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DishSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// One ordered product instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique within the order's item list, stable across undo
    pub line_id: String,
    /// Catalog product reference
    pub dish_id: String,
    /// Missing on the wire means 0, which prices as an empty line
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub toppings: Vec<Topping>,
    /// Cached catalog record at order time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish: Option<DishSnapshot>,
    /// Cached unit price at order time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl LineItem {
    pub fn new(line_id: impl Into<String>, dish_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            line_id: line_id.into(),
            dish_id: dish_id.into(),
            quantity,
            toppings: Vec::new(),
            dish: None,
            price: None,
        }
    }

    pub fn with_toppings(mut self, toppings: Vec<Topping>) -> Self {
        self.toppings = toppings;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_dish(mut self, dish: DishSnapshot) -> Self {
        self.dish = Some(dish);
        self
    }

    /// Price to use when the live catalog has no entry for this dish.
    ///
    /// The dish snapshot wins over the bare cached price.
    pub fn fallback_price(&self) -> Option<f64> {
        self.dish
            .as_ref()
            .and_then(|d| d.price)
            .or(self.price)
    }

    /// Name for notifications, falling back to the line id
    pub fn display_name(&self) -> &str {
        self.dish
            .as_ref()
            .and_then(|d| d.name.as_deref())
            .unwrap_or(&self.line_id)
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Current catalog record for a dish
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl CatalogEntry {
    pub fn priced(price: f64) -> Self {
        Self {
            name: None,
            price: Some(price),
        }
    }
}

/// Dish id -> current catalog record
pub type CatalogPriceMap = HashMap<String, CatalogEntry>;

// ============================================================================
// Order Charges & Totals
// ============================================================================

/// Order-level amounts supplied by the order context
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderCharges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<f64>,
}

impl OrderCharges {
    pub fn new(shipping_fee: f64, total_discount: f64) -> Self {
        Self {
            shipping_fee: Some(shipping_fee),
            total_discount: Some(total_discount),
        }
    }
}

/// Derived totals, never persisted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderTotals {
    /// Sum of all line subtotals
    pub subtotal_price: f64,
    /// subtotal + shipping - discount, may be negative
    pub final_total: f64,
}
