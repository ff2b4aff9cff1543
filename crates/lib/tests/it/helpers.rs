use jsonobject::{Doc, Value};

/// A document shaped like a typical query response: identity fields, a nested owner,
/// a reference field and a `results` list.
pub fn sample_response() -> Doc {
    Doc::parse(
        r#"{
            "Id": 100,
            "ParentId": "12",
            "ParentType": "unit",
            "Title": "Pump inspection",
            "Price": 12.01,
            "Due": "2014-06-23T10:00:00+02:00",
            "Owner": { "Name": "Kari", "Active": true },
            "e_owner_ids": { "type": "person", "values": ["42"] },
            "Tags": ["a", "b"],
            "results": [
                { "id": 1, "etag": "v1" },
                { "id": 2, "etag": "v2" }
            ]
        }"#,
    )
    .unwrap()
}

/// Assert that a document holds the given string values
pub fn assert_strings(doc: &Doc, expected: &[(&str, &str)]) {
    for (key, expected_value) in expected {
        match doc.get(key) {
            Some(Value::String(actual)) => {
                assert_eq!(actual, expected_value, "Value mismatch for key '{key}'");
            }
            Some(other) => panic!("Expected string value for key '{key}', got: {other:?}"),
            None => panic!("Key '{key}' not found in document"),
        }
    }
}
