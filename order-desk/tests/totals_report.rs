//! Totals report from order documents on disk

use order_desk::pricing::CurrencyFormat;
use order_desk::{Config, OrderDocument, TotalsReport};
use shared::error::ErrorCode;
use shared::session::{Role, SessionContext};
use std::io::Write;

fn write_doc(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_report_with_catalog_miss_and_negative_total() {
    let file = write_doc(
        r#"{
            "items": [
                {"line_id": "a", "dish_id": "d1", "quantity": 1},
                {"line_id": "b", "dish_id": "retired", "quantity": 2,
                 "dish": {"name": "Old soup", "price": 12000}},
                {"line_id": "c", "dish_id": "unknown"}
            ],
            "catalog": {"d1": {"name": "Pho", "price": 40000}},
            "charges": {"total_discount": 100000}
        }"#,
    );

    let doc = OrderDocument::load(file.path()).unwrap();
    let session = SessionContext::new(None, Role::Cashier);
    let report = TotalsReport::build(&doc, &session, &CurrencyFormat::vnd());

    let subtotals: Vec<f64> = report.lines.iter().map(|l| l.subtotal).collect();
    assert_eq!(subtotals, vec![40_000.0, 24_000.0, 0.0]);
    assert_eq!(report.subtotal_price, 64_000.0);
    assert_eq!(report.final_total, -36_000.0);
    assert_eq!(report.final_total_display, "-36.000 ₫");
}

#[test]
fn test_report_json_shape() {
    let file = write_doc(r#"{"items": [{"line_id": "a", "dish_id": "d1", "quantity": 3}],
                             "catalog": {"d1": {"price": 1000}}}"#);
    let doc = OrderDocument::load(file.path()).unwrap();
    let config = Config::from_lookup(|key| match key {
        "STORE_ID" => Some("store-9".to_string()),
        "CURRENCY_SYMBOL" => Some("VND".to_string()),
        _ => None,
    });
    let session = config.session().unwrap();

    let report = TotalsReport::build(&doc, &session, &config.currency_format());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["store_id"], "store-9");
    assert_eq!(json["subtotal_price"], 3000.0);
    assert_eq!(json["final_total_display"], "3.000 VND");
    assert_eq!(json["lines"][0]["line_id"], "a");
}

#[test]
fn test_malformed_document() {
    let file = write_doc("not json");
    let err = OrderDocument::load(file.path()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
}

#[test]
fn test_viewer_may_not_price_orders() {
    let session = SessionContext::new(Some("store-1".to_string()), Role::Viewer);
    let err = session.require_role(Role::Cashier).unwrap_err();
    assert_eq!(err.code, ErrorCode::RoleRequired);
}
