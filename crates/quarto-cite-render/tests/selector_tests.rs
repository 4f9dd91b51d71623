//! Tests for record selection.

use std::collections::HashMap;

use quarto_cite_render::{Condition, Error, Selector, SelectorMode, SelectorSpec};
use serde_json::{Value, json};

fn library() -> Vec<Value> {
    vec![
        json!({"id": "a", "type": "book", "language": "en", "categories": ["history"]}),
        json!({"id": "b", "type": "article-journal", "language": "de"}),
        json!({"id": "c", "type": "book", "language": "de", "categories": ["fiction", "1990s"]}),
        json!({"id": "d", "type": "chapter"}),
    ]
}

fn ids(records: &[&Value]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_structured_and_serialized_forms_agree() {
    let structured = Selector::from_structured(
        SelectorSpec::new()
            .with(SelectorMode::Select, Condition::new("type", "book"))
            .with(SelectorMode::Exclude, Condition::new("language", "de")),
    );
    let serialized = Selector::from_serialized(
        r#"{
            "select": [{"field": "type", "value": "book"}],
            "exclude": [{"field": "language", "value": "de"}]
        }"#,
    )
    .unwrap();
    assert_eq!(structured, serialized);

    let records = library();
    assert_eq!(ids(&structured.filter(&records)), ids(&serialized.filter(&records)));
    assert_eq!(ids(&structured.filter(&records)), vec!["a"]);
}

#[test]
fn test_from_str() {
    let selector: Selector = r#"{"include": [{"field": "type", "value": "chapter"}]}"#
        .parse()
        .unwrap();
    assert_eq!(selector.include().len(), 1);
}

#[test]
fn test_conditions_lists_all_modes() {
    let selector = Selector::from_value(json!({
        "select": [{"field": "type", "value": "book"}],
        "include": [{"field": "language", "value": ["en", "fr"]}],
        "quash": [{"field": "categories", "value": "fiction"}]
    }))
    .unwrap();
    let fields: Vec<&str> = selector.conditions().iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["type", "language", "categories"]);
}

#[test]
fn test_malformed_input_is_parse_error() {
    for input in [
        "{",
        r#"{"select": "book"}"#,
        r#"{"select": [{"field": "type"}]}"#,
        r#"{"select": [{"field": "type", "value": {"nested": true}}]}"#,
    ] {
        match Selector::from_serialized(input) {
            Err(Error::Parse { .. }) => {}
            other => panic!("expected parse error for {}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_unknown_keys_are_ignored() {
    let selector = Selector::from_serialized(r#"{"sort": "author"}"#).unwrap();
    assert!(selector.is_empty());
    assert_eq!(selector.filter(&library()).len(), 4);
}

// ============================================================================
// Evaluation
// ============================================================================

#[test]
fn test_empty_selector_passes_everything() {
    let records = vec![json!(1), json!(2), json!(3)];
    let selector = Selector::new();
    assert_eq!(selector.filter(&records).len(), 3);
}

#[test]
fn test_select_book() {
    let records = vec![
        json!({"id": 1, "type": "book"}),
        json!({"id": 2, "type": "article"}),
        json!({"id": 3}),
    ];
    let selector =
        Selector::from_serialized(r#"{"select": [{"field": "type", "value": "book"}]}"#).unwrap();
    let selected = selector.filter(&records);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["id"], 1);
}

#[test]
fn test_include_any_group() {
    let selector = Selector::from_structured(
        SelectorSpec::new()
            .with(SelectorMode::Include, Condition::new("type", "chapter"))
            .with(SelectorMode::Include, Condition::new("language", "en")),
    );
    assert_eq!(ids(&selector.filter(&library())), vec!["a", "d"]);
}

#[test]
fn test_same_field_conditions_are_alternatives() {
    let selector = Selector::from_structured(
        SelectorSpec::new()
            .with(SelectorMode::Select, Condition::new("type", "book"))
            .with(SelectorMode::Select, Condition::new("type", "chapter")),
    );
    assert_eq!(ids(&selector.filter(&library())), vec!["a", "c", "d"]);
}

#[test]
fn test_list_field_intersects() {
    let selector = Selector::from_value(json!({
        "select": [{"field": "categories", "value": ["1990s", "poetry"]}]
    }))
    .unwrap();
    assert_eq!(ids(&selector.filter(&library())), vec!["c"]);
}

#[test]
fn test_missing_field_does_not_match() {
    let selector = Selector::from_value(json!({
        "exclude": [{"field": "language", "value": "de"}]
    }))
    .unwrap();
    // "d" has no language, so it is not excluded
    assert_eq!(ids(&selector.filter(&library())), vec!["a", "d"]);
}

#[test]
fn test_quash_rejects_only_full_match() {
    let selector = Selector::from_value(json!({
        "quash": [
            {"field": "type", "value": "book"},
            {"field": "language", "value": "de"}
        ]
    }))
    .unwrap();
    assert_eq!(ids(&selector.filter(&library())), vec!["a", "b", "d"]);
}

#[test]
fn test_numbers_compare_as_text() {
    let selector =
        Selector::from_serialized(r#"{"select": [{"field": "volume", "value": 12}]}"#).unwrap();
    assert!(selector.matches(&json!({"volume": "12"})));
    assert!(selector.matches(&json!({"volume": 12})));
    assert!(!selector.matches(&json!({"volume": 13})));
}

#[test]
fn test_string_map_records() {
    let selector =
        Selector::from_serialized(r#"{"select": [{"field": "type", "value": "book"}]}"#).unwrap();
    let mut record = HashMap::new();
    record.insert("type".to_string(), "book".to_string());
    assert!(selector.matches(&record));
    record.insert("type".to_string(), "report".to_string());
    assert!(!selector.matches(&record));
}

#[test]
fn test_predicate_with_iterator_filter() {
    let records = library();
    let selector = Selector::from_value(json!({
        "select": [{"field": "language", "value": "de"}]
    }))
    .unwrap();
    let count = records.iter().filter(selector.as_predicate::<&Value>()).count();
    assert_eq!(count, 2);
}

#[test]
fn test_round_trip_through_json() {
    let selector = Selector::from_value(json!({
        "include": [{"field": "type", "value": ["book", "chapter"]}],
        "ignored": true
    }))
    .unwrap();
    assert_eq!(
        selector.to_json(),
        json!({"include": [{"field": "type", "value": ["book", "chapter"]}]})
    );
    assert_eq!(Selector::from_value(selector.to_json()).unwrap(), selector);
}

#[test]
fn test_selector_shared_across_threads() {
    let selector =
        Selector::from_serialized(r#"{"select": [{"field": "type", "value": "book"}]}"#).unwrap();
    let records = library();
    let (selector, records) = (&selector, &records);
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || selector.filter(records).len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(counts, vec![2; 4]);
}
