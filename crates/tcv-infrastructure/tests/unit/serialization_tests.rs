//! Shared JSON settings tests

use serde::Serialize;
use serde_json::json;
use tcv_infrastructure::serialization::{JsonSettings, KeyNaming};

#[derive(Serialize)]
struct Order {
    order_id: u32,
    line_items: Vec<LineItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LineItem {
    unit_price: u32,
}

fn order() -> Order {
    Order {
        order_id: 7,
        line_items: vec![LineItem { unit_price: 3 }],
    }
}

#[test]
fn test_default_writes_camel_case_keys() {
    let value = JsonSettings::default().to_value(&order()).unwrap();

    assert_eq!(value, json!({ "orderId": 7, "lineItems": [{ "unitPrice": 3 }] }));
}

#[test]
fn test_as_declared_keeps_keys() {
    let settings = JsonSettings {
        key_naming: KeyNaming::AsDeclared,
        ..JsonSettings::default()
    };

    let text = settings.to_json(&order()).unwrap();
    assert!(!text.contains('\n'));
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({ "order_id": 7, "line_items": [{ "UnitPrice": 3 }] }));
}

#[test]
fn test_pretty_output_is_indented() {
    let settings = JsonSettings {
        pretty: true,
        ..JsonSettings::default()
    };

    let text = settings.to_json(&json!({ "retry_count": 1 })).unwrap();
    assert_eq!(text, "{\n  \"retryCount\": 1\n}");
}
