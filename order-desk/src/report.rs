//! Order totals report
//!
//! Reads an order document (items, catalog snapshot, charges) and produces
//! the totals the checkout panel shows.

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::order::{CatalogPriceMap, LineItem, OrderCharges};
use shared::session::SessionContext;
use std::path::Path;

use crate::pricing::{CurrencyFormat, compute_totals, line_subtotal};

/// Order as exported by the back office
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDocument {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub catalog: CatalogPriceMap,
    #[serde(default)]
    pub charges: OrderCharges,
}

impl OrderDocument {
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            AppError::invalid_format(format!("Invalid order document: {}", e))
                .with_detail("line", e.line())
                .with_detail("column", e.column())
        })
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            let code = if e.kind() == std::io::ErrorKind::NotFound {
                ErrorCode::OrderNotFound
            } else {
                ErrorCode::InternalError
            };
            AppError::with_message(code, format!("Cannot read {}: {}", path.display(), e))
                .with_detail("path", path.display().to_string())
        })?;
        Self::from_json(&json)
    }
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineReport {
    pub line_id: String,
    pub quantity: i32,
    pub subtotal: f64,
    pub subtotal_display: String,
}

/// Totals for display or JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    pub lines: Vec<LineReport>,
    pub subtotal_price: f64,
    pub final_total: f64,
    pub subtotal_display: String,
    pub final_total_display: String,
}

impl TotalsReport {
    pub fn build(doc: &OrderDocument, session: &SessionContext, format: &CurrencyFormat) -> Self {
        let lines = doc
            .items
            .iter()
            .map(|line| {
                let subtotal = line_subtotal(line, &doc.catalog);
                LineReport {
                    line_id: line.line_id.clone(),
                    quantity: line.quantity,
                    subtotal,
                    subtotal_display: format.format(Some(subtotal)),
                }
            })
            .collect();

        let totals = compute_totals(&doc.items, &doc.charges, &doc.catalog);

        Self {
            store_id: session.store_id.clone(),
            lines,
            subtotal_price: totals.subtotal_price,
            final_total: totals.final_total,
            subtotal_display: format.format(Some(totals.subtotal_price)),
            final_total_display: format.format(Some(totals.final_total)),
        }
    }

    /// Plain-text rendering for the terminal
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(store) = &self.store_id {
            out.push_str(&format!("Store: {}\n", store));
        }
        for line in &self.lines {
            out.push_str(&format!(
                "  {:<12} x{:<3} {:>16}\n",
                line.line_id, line.quantity, line.subtotal_display
            ));
        }
        out.push_str(&format!("Subtotal: {}\n", self.subtotal_display));
        out.push_str(&format!("Total:    {}\n", self.final_total_display));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::session::Role;

    const EXAMPLE: &str = r#"{
        "items": [
            {"line_id": "a", "dish_id": "d1", "quantity": 2, "toppings": [{"price": 5000}]}
        ],
        "catalog": {"d1": {"price": 40000}},
        "charges": {"shipping_fee": 15000, "total_discount": 10000}
    }"#;

    #[test]
    fn test_build_report_from_example() {
        let doc = OrderDocument::from_json(EXAMPLE).unwrap();
        let session = SessionContext::new(Some("store-1".to_string()), Role::Cashier);

        let report = TotalsReport::build(&doc, &session, &CurrencyFormat::vnd());

        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].subtotal, 90_000.0);
        assert_eq!(report.subtotal_price, 90_000.0);
        assert_eq!(report.final_total, 95_000.0);
        assert_eq!(report.final_total_display, "95.000 ₫");

        let text = report.render();
        assert!(text.contains("Store: store-1"));
        assert!(text.contains("Total:    95.000 ₫"));
    }

    #[test]
    fn test_empty_document() {
        let doc = OrderDocument::from_json("{}").unwrap();
        let report = TotalsReport::build(&doc, &SessionContext::default(), &CurrencyFormat::vnd());
        assert!(report.lines.is_empty());
        assert_eq!(report.final_total_display, "0 ₫");
        assert!(!report.render().contains("Store:"));
    }

    #[test]
    fn test_invalid_json() {
        let err = OrderDocument::from_json(r#"{"items": 3}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(err.details.unwrap().contains_key("line"));
    }

    #[test]
    fn test_missing_file() {
        let err = OrderDocument::load(Path::new("/nonexistent/order.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }
}
