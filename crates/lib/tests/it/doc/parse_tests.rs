//! Parsing and canonical rendering

use std::str::FromStr;

use bigdecimal::BigDecimal;
use jsonobject::{DateHandling, Doc, ParseOptions, Value};

use crate::helpers::*;

#[test]
fn test_identity_from_parse() {
    let mut doc = Doc::parse(r#"{"id": 1}"#).unwrap();
    assert_ne!(doc.id(), "0");
    assert_eq!(doc.id(), "1");

    let mut empty = Doc::parse("{}").unwrap();
    assert_eq!(empty.id(), "0");
}

#[test]
fn test_scalar_types_follow_json_tags() {
    let doc = Doc::parse(
        r#"{"n": null, "b": false, "i": -7, "d": 12.01, "s": "text", "t": "2014-06-23T10:00:00Z"}"#,
    )
    .unwrap();

    assert_eq!(doc.get("n"), Some(&Value::Null));
    assert_eq!(doc.get("b"), Some(&Value::Bool(false)));
    assert_eq!(doc.get("i"), Some(&Value::Integer(-7)));
    assert_eq!(
        doc.get("d"),
        Some(&Value::Decimal(BigDecimal::from_str("12.01").unwrap()))
    );
    assert_strings(&doc, &[("s", "text")]);
    assert_eq!(doc.get("t").map(Value::type_name), Some("datetime"));
}

#[test]
fn test_empty_array_is_value_array() {
    let doc = Doc::parse(r#"{"unit_ids": []}"#).unwrap();
    assert_eq!(doc.get("unit_ids"), Some(&Value::ValueArray(Vec::new())));
}

#[test]
fn test_scalar_array_is_value_array() {
    let doc = Doc::parse(r#"{"unit_ids": ["1", "2", "3"]}"#).unwrap();
    let items = doc.get("unit_ids").and_then(Value::as_value_array).unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[2], "3");
}

#[test]
fn test_object_array_is_list_of_documents() {
    let doc = Doc::parse(r#"{"children": [{"id": 2}, {"id": 3}]}"#).unwrap();
    let children = doc.get("children").and_then(Value::as_object_array).unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].get("id"), Some(&Value::Integer(2)));
    assert!(doc.get("children").and_then(Value::as_value_array).is_none());
}

#[test]
fn test_first_element_decides_mixed_arrays() {
    let doc = Doc::parse(r#"{"mixed": [1, {"id": 2}]}"#).unwrap();
    let items = doc.get("mixed").and_then(Value::as_value_array).unwrap();
    assert_eq!(items[0], 1i64);
    assert_eq!(items[1].type_name(), "document");

    let err = Doc::parse(r#"{"mixed": [{"id": 2}, 1]}"#).unwrap_err();
    assert!(err.is_malformed_input());
}

#[test]
fn test_generated_fields() {
    let dropped = Doc::parse(r#"{"a_gen_a": "x", "e_gen_b": 1, "a_kept": 2}"#).unwrap();
    assert!(!dropped.contains_key("a_gen_a"));
    assert!(!dropped.contains_key("e_gen_b"));
    assert!(dropped.contains_key("a_kept"));

    let kept = Doc::parse_with(
        r#"{"a_gen_a": "x"}"#,
        ParseOptions::new().with_generated(true),
    )
    .unwrap();
    assert!(kept.contains_key("a_gen_a"));
}

#[test]
fn test_single_quoted_input() {
    let doc = Doc::parse("{'unit_ids': []}").unwrap();
    assert_eq!(doc.get("unit_ids"), Some(&Value::ValueArray(Vec::new())));

    let doc = Doc::parse("{'unit_ids': ['1','2','3']}").unwrap();
    let items = doc.get("unit_ids").and_then(Value::as_value_array).unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], "1");

    let doc = Doc::parse("{'children':[{'id':2},{'id':3}]}").unwrap();
    let children = doc.get("children").and_then(Value::as_object_array).unwrap();
    assert_eq!(children.len(), 2);
    assert!(doc.get("children").and_then(Value::as_value_array).is_none());

    assert!(!Doc::parse("{'a_gen_a':'x'}").unwrap().contains_key("a_gen_a"));
    let kept = Doc::parse_with("{'a_gen_a':'x'}", ParseOptions::new().with_generated(true)).unwrap();
    assert!(kept.contains_key("a_gen_a"));
}

#[test]
fn test_single_quoted_strings_keep_their_content() {
    let doc = Doc::parse(r#"{'Title': 'say "hi"', 'Note': 'it\'s', "Plain": "don't"}"#).unwrap();
    assert_strings(
        &doc,
        &[("title", r#"say "hi""#), ("note", "it's"), ("plain", "don't")],
    );
}

#[test]
fn test_generated_fields_dropped_in_object_arrays() {
    let doc = Doc::parse(r#"{"rows": [{"id": 1, "A_GEN_x": 1}]}"#).unwrap();
    let rows = doc.get("rows").and_then(Value::as_object_array).unwrap();
    assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["id"]);
}

#[test]
fn test_dates_as_text() {
    let options = ParseOptions::new().with_dates(DateHandling::AsText);
    let doc = Doc::parse_with(r#"{"due": "2014-06-23T10:00:00Z"}"#, options).unwrap();
    assert_strings(&doc, &[("due", "2014-06-23T10:00:00Z")]);
}

#[test]
fn test_malformed_input() {
    for text in ["", "{", "{'unterminated: 1}", "{'a': [}", "[]", "['a']", "42"] {
        let err = Doc::parse(text).unwrap_err();
        assert!(err.is_malformed_input(), "expected malformed input for {text:?}");
    }
}

#[test]
fn test_canonical_rendering() {
    let doc = Doc::parse(
        r#"{"Big": 1e3, "Int": 10, "Small": 0.000001, "At": "2014-06-23T10:00:00+02:00"}"#,
    )
    .unwrap();
    assert_eq!(
        doc.to_json_string(),
        r#"{"at":"2014-06-23T10:00:00+02:00","big":1000.0,"int":10,"small":0.000001}"#
    );
}

#[test]
fn test_render_then_parse_is_stable() {
    let doc = sample_response();
    let reparsed = Doc::parse(&doc.to_json_string()).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(format!("{doc}"), doc.to_json_string());
}

#[test]
fn test_pretty_and_writer() {
    let doc = Doc::new().with("a", 1);
    assert_eq!(doc.to_json_pretty().unwrap(), "{\n  \"a\": 1\n}");

    let mut out = Vec::new();
    doc.to_writer(&mut out).unwrap();
    assert_eq!(out, br#"{"a":1}"#);
}
