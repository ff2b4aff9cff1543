//! Envelope integration tests

use jsonobject::{DateHandling, ParseOptions, ReferenceRead, Value, envelope};

use crate::helpers::*;

#[test]
fn test_round_trip_through_base64() {
    let doc = sample_response();
    let encoded = envelope::encode(&doc);
    assert!(!encoded.contains('{'));
    assert_eq!(envelope::decode(&encoded).unwrap(), doc);
}

#[test]
fn test_raw_text_fallback() {
    let doc = envelope::decode(&sample_response().to_json_string()).unwrap();
    assert_eq!(doc.values_from_reference("e_owner_ids"), vec!["42"]);
}

#[test]
fn test_decode_with_options() {
    let options = ParseOptions::new().with_dates(DateHandling::AsText);
    let doc = envelope::decode_with(r#"{"due": "2014-06-23T10:00:00Z"}"#, options).unwrap();
    assert_eq!(doc.get("due"), Some(&Value::from("2014-06-23T10:00:00Z")));
}

#[test]
fn test_decode_rejects_invalid_payloads() {
    assert!(envelope::decode("").unwrap_err().is_malformed_input());
    // Valid base64 of text that is not JSON
    assert!(envelope::decode("aGVsbG8=").unwrap_err().is_malformed_input());
}
