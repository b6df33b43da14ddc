//! Tests for the optional serde support.

mod common;
use common::*;

use oxide_query_core::ast::SelectStatement;

#[test]
fn statement_json_round_trip() {
    let stmt = parse("select a, count(b) from t where not (a = 1 or b like \"x\") order by a desc");
    let json = serde_json::to_string(&stmt).unwrap();
    let back: SelectStatement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stmt);
}

#[test]
fn statement_json_shape() {
    let stmt = parse("select a from t where a = 1");
    let value = serde_json::to_value(&stmt).unwrap();
    assert_eq!(value["table"], "t");
    assert_eq!(value["fields"][0]["Bare"], "a");
    assert_eq!(value["condition"]["Comparison"]["field"], "a");
    assert_eq!(value["condition"]["Comparison"]["value"]["Number"], "1");
    assert!(value["group_by"].is_null());
}
