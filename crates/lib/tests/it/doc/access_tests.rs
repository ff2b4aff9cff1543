//! Typed accessor integration tests, run against both document forms

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset};
use jsonobject::{Doc, FrozenDoc, TypedAccess, Value};

use crate::helpers::*;

fn check_defaulting_accessors<D: TypedAccess>(doc: &D) {
    assert_eq!(doc.get_string_or_empty("TITLE"), "Pump inspection");
    assert_eq!(doc.get_string_or_empty("missing"), "");
    assert_eq!(doc.get_string_or_empty("price"), "12.01");
    assert_eq!(doc.get_number_or_default("id"), 100);
    assert_eq!(doc.get_number_or_default("parentid"), 12);
    assert_eq!(doc.get_number_or_default("title"), 0);
    assert_eq!(doc.get_ulong_or_default("id"), 100);
    assert!(!doc.get_bool_or_false("title"));
    assert_eq!(
        doc.get_datetime_or_default("due"),
        DateTime::parse_from_rfc3339("2014-06-23T10:00:00+02:00").unwrap()
    );
    assert_eq!(
        doc.get_datetime_or_default("title"),
        DateTime::<FixedOffset>::default()
    );
}

#[test]
fn test_defaulting_accessors_on_both_forms() {
    let doc = sample_response();
    check_defaulting_accessors(&doc);
    check_defaulting_accessors(&FrozenDoc::from_mutable(&doc));
}

#[test]
fn test_number_from_strings_and_booleans() {
    let doc = Doc::parse(r#"{"a": "asd", "b": "1", "c": false, "d": " 42 "}"#).unwrap();
    assert_eq!(doc.get_number_or_default("a"), 0);
    assert_eq!(doc.get_number_or_default("b"), 1);
    assert_eq!(doc.get_number_or_default("c"), 0);
    assert_eq!(doc.get_number_or_default("d"), 42);
}

#[test]
fn test_ulong_beyond_signed_range() {
    let doc = Doc::parse(r#"{"big": 18446744073709551615, "neg": -5}"#).unwrap();
    assert_eq!(doc.get_ulong_or_default("big"), u64::MAX);
    assert_eq!(doc.get_ulong_or_default("neg"), 0);
}

#[test]
fn test_get_list_variants() {
    let doc = sample_response();
    assert_eq!(doc.get_list::<String>("tags").unwrap(), vec!["a", "b"]);
    assert!(doc.get_list::<i64>("tags").unwrap().is_empty());
    assert_eq!(doc.get_list::<Doc>("results").unwrap().len(), 2);
    assert_eq!(doc.get_list::<Value>("tags").unwrap().len(), 2);
    assert!(doc.get_list::<String>("title").unwrap().is_empty());

    let frozen = doc.freeze();
    assert_eq!(frozen.get_list::<FrozenDoc>("results").unwrap().len(), 2);
}

#[test]
fn test_get_value_strict_and_loose_results() {
    let doc = sample_response();

    assert_eq!(doc.get_value::<i64>("id").unwrap(), 100);
    assert_eq!(
        doc.get_value::<BigDecimal>("price").unwrap(),
        BigDecimal::from_str("12.01").unwrap()
    );
    assert!(doc.get_value::<Doc>("owner").is_ok());

    let err = doc.get_value::<Doc>("title").unwrap_err();
    assert!(err.is_type_error());
    assert!(err.to_string().contains("'title'"));

    let err = doc.get_value::<i64>("").unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_results_helpers() {
    let doc = sample_response();
    assert_eq!(doc.results().len(), 2);
    assert!(!doc.has_no_results());
    assert!(doc.first_result_etag_matches("v1"));
    assert!(!doc.first_result_etag_matches("v2"));

    let single = Doc::new().with("results", Doc::new().with("id", 9));
    assert_eq!(single.results().len(), 1);
    assert!(!single.has_no_results());
}

#[test]
fn test_has_no_results_cases() {
    assert!(Doc::new().has_no_results());
    assert!(Doc::parse(r#"{"results": []}"#).unwrap().has_no_results());
    assert!(Doc::parse(r#"{"results": [{"id": "0"}]}"#).unwrap().has_no_results());
    assert!(Doc::parse(r#"{"other": 1}"#).unwrap().has_no_results());
    assert!(!Doc::parse(r#"{"results": [{"id": "4"}]}"#).unwrap().has_no_results());
}

#[test]
fn test_etag_on_document_itself() {
    let doc = Doc::new().with("ETag", "abc");
    assert!(doc.etag_matches("abc"));
    assert!(!doc.etag_matches("ABC"));
    assert!(!Doc::new().etag_matches("abc"));
}
