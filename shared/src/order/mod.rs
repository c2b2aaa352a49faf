//! Order line model shared by pricing and the cart

pub mod types;

pub use types::{
    CatalogEntry, CatalogPriceMap, DishSnapshot, LineItem, MAX_LINE_QUANTITY, MIN_LINE_QUANTITY,
    OrderCharges, OrderTotals, Topping,
};
