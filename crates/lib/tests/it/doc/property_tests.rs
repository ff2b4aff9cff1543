//! Property-based tests for the laws that hold over every document

use std::str::FromStr;

use bigdecimal::BigDecimal;
use jsonobject::{Doc, FrozenDoc, Value};
use proptest::prelude::*;

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1000i64..1000, 0u32..100).prop_map(|(whole, frac)| {
            Value::Decimal(BigDecimal::from_str(&format!("{whole}.{frac:02}")).unwrap())
        }),
        "[a-z ]{0,8}".prop_map(Value::String),
    ]
}

fn arb_entries(value: impl Strategy<Value = Value>) -> impl Strategy<Value = Doc> {
    prop::collection::btree_map("[a-z]{1,6}", value, 0..4)
        .prop_map(|map| map.into_iter().collect::<Doc>())
}

/// Values whose canonical JSON parses back to the same variant
fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(arb_leaf(), 0..4).prop_map(Value::ValueArray),
            arb_entries(inner.clone()).prop_map(Value::Document),
            prop::collection::vec(arb_entries(inner), 1..3).prop_map(Value::ObjectArray),
        ]
    })
}

fn arb_doc() -> impl Strategy<Value = Doc> {
    arb_entries(arb_value())
}

proptest! {
    #[test]
    fn freeze_then_thaw_is_identity(doc in arb_doc()) {
        prop_assert_eq!(FrozenDoc::from_mutable(&doc).to_mutable(), doc);
    }

    #[test]
    fn thaw_then_freeze_is_identity(doc in arb_doc()) {
        let frozen = FrozenDoc::from_mutable(&doc);
        prop_assert_eq!(FrozenDoc::from_mutable(&frozen.to_mutable()), frozen);
    }

    #[test]
    fn render_then_parse_is_identity(doc in arb_doc()) {
        let reparsed = Doc::parse(&doc.to_json_string()).unwrap();
        prop_assert_eq!(reparsed, doc);
    }

    #[test]
    fn keys_are_case_insensitive(key in "[a-zA-Z]{1,10}", value in arb_leaf()) {
        let mut doc = Doc::new();
        doc.set(key.as_str(), value.clone());

        prop_assert_eq!(doc.get(&key), Some(&value));
        prop_assert_eq!(doc.get(&key.to_uppercase()), Some(&value));
        prop_assert_eq!(doc.get(&key.to_lowercase()), Some(&value));

        let frozen = FrozenDoc::new().set_item(key.to_uppercase(), value.freeze());
        prop_assert!(frozen.contains_key(&key));
    }

    #[test]
    fn snapshot_edits_leave_receiver_unchanged(doc in arb_doc(), key in "[a-z]{1,6}") {
        let frozen = FrozenDoc::from_mutable(&doc);
        let before = frozen.clone();

        let _ = frozen.set_item(key.as_str(), "edited");
        let _ = frozen.remove(&key);
        let _ = frozen.clear();

        prop_assert_eq!(frozen, before);
    }
}
