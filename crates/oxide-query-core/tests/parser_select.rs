//! Tests for field lists, tables and trailing clauses.

mod common;
use common::*;

use oxide_query_core::ast::{AggregationKind, FieldSpec, SortDirection};

#[test]
fn select_without_where_has_no_optional_parts() {
    let stmt = parse("select id, name from users");
    assert_eq!(stmt.table, "users");
    assert_eq!(stmt.condition, None);
    assert_eq!(stmt.group_by, None);
    assert_eq!(stmt.order_by, None);
    assert_eq!(stmt.sort_direction, None);
}

#[test]
fn select_qualified_fields() {
    let stmt = parse("select users.id, users.profile.name from users");
    assert_eq!(
        stmt.fields,
        vec![
            FieldSpec::bare("users.id"),
            FieldSpec::bare("users.profile.name"),
        ]
    );
}

#[test]
fn select_mixed_aggregations_keep_column_order() {
    let stmt = parse("select count(x), y from t");
    assert_eq!(
        stmt.fields,
        vec![
            FieldSpec::aggregated(AggregationKind::Count, "x"),
            FieldSpec::bare("y"),
        ]
    );
    assert_eq!(stmt.bare_fields().collect::<Vec<_>>(), vec!["y"]);
    assert_eq!(
        stmt.aggregations().collect::<Vec<_>>(),
        vec![(AggregationKind::Count, "x")]
    );
}

#[test]
fn select_every_aggregation() {
    let stmt = parse("select count(a), sum(b), average(c), min(d), max(e), distinct(f) from t");
    let kinds: Vec<_> = stmt.aggregations().map(|(kind, _)| kind).collect();
    assert_eq!(
        kinds,
        vec![
            AggregationKind::Count,
            AggregationKind::Sum,
            AggregationKind::Average,
            AggregationKind::Min,
            AggregationKind::Max,
            AggregationKind::Distinct,
        ]
    );
}

#[test]
fn select_whitespace_is_flexible() {
    let stmt = parse("\tselect\n a ,b\r\nfrom   t  ");
    assert_eq!(stmt.fields, vec![FieldSpec::bare("a"), FieldSpec::bare("b")]);
    assert_eq!(stmt.table, "t");
}

#[test]
fn group_by_after_where() {
    let stmt = parse("select a, count(b) from t where a > 1 group by a");
    assert_eq!(stmt.group_by, Some(vec![FieldSpec::bare("a")]));
    assert_eq!(stmt.order_by, None);
}

#[test]
fn group_by_directly_after_table() {
    let stmt = parse("select a from t group by a, t.b");
    assert_eq!(stmt.condition, None);
    assert_eq!(
        stmt.group_by,
        Some(vec![FieldSpec::bare("a"), FieldSpec::bare("t.b")])
    );
}

#[test]
fn order_by_with_direction() {
    let stmt = parse("select a from t where a = 1 order by max(a) desc");
    assert_eq!(
        stmt.order_by,
        Some(vec![FieldSpec::aggregated(AggregationKind::Max, "a")])
    );
    assert_eq!(stmt.sort_direction, Some(SortDirection::Desc));
}

#[test]
fn order_by_without_direction() {
    let stmt = parse("select a from t order by a");
    assert_eq!(stmt.order_by, Some(vec![FieldSpec::bare("a")]));
    assert_eq!(stmt.sort_direction, None);
}

#[test]
fn group_by_then_order_by() {
    let stmt = parse("select a from t group by a order by a asc");
    assert_eq!(stmt.group_by, Some(vec![FieldSpec::bare("a")]));
    assert_eq!(stmt.order_by, Some(vec![FieldSpec::bare("a")]));
    assert_eq!(stmt.sort_direction, Some(SortDirection::Asc));
}
