//! Persistent document integration tests

use std::{sync::Arc, thread};

use jsonobject::{Doc, FrozenDoc, FrozenValue, TypedAccess, Value};

use crate::helpers::*;

#[test]
fn test_from_mutable_round_trip() {
    let doc = sample_response();
    let frozen = FrozenDoc::from_mutable(&doc);

    assert_eq!(frozen.len(), doc.len());
    assert_eq!(frozen.to_mutable(), doc);
    assert_eq!(FrozenDoc::from_mutable(&frozen.to_mutable()), frozen);
}

#[test]
fn test_nested_structures_are_frozen() {
    let frozen = FrozenDoc::from_mutable(&sample_response());

    let owner = frozen.get("owner").and_then(FrozenValue::as_document).unwrap();
    assert!(owner.get_bool_or_false("active"));

    let results = frozen.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].id(), "2");
}

#[test]
fn test_thawed_lists_are_editable() {
    let frozen = FrozenDoc::from_mutable(&sample_response());
    let mut thawed = frozen.to_mutable();

    thawed
        .get_object_list_and_create_if_missing("results")
        .unwrap()
        .push(Doc::new().with("id", 3));

    assert_eq!(thawed.results().len(), 3);
    assert_eq!(frozen.results().len(), 2);
}

#[test]
fn test_edits_return_new_snapshots() {
    let base = FrozenDoc::from_mutable(&Doc::new().with("a", 1).with("b", 2));

    let set = base.set_item("A", 10);
    let removed = base.remove("b");
    let added = base.add("c", 3).unwrap();
    let ranged = base.add_range([("d", 4), ("e", 5)]).unwrap();
    let many = base.set_items([("a", 0), ("z", 26)]);
    let cleared = base.clear();

    assert_eq!(base.get("a"), Some(&FrozenValue::Integer(1)));
    assert_eq!(base.len(), 2);

    assert_eq!(set.get("a"), Some(&FrozenValue::Integer(10)));
    assert!(!removed.contains_key("b"));
    assert!(added.contains_key("C"));
    assert_eq!(ranged.len(), 4);
    assert_eq!(many.keys().collect::<Vec<_>>(), vec!["a", "b", "z"]);
    assert!(cleared.is_empty());
}

#[test]
fn test_add_conflicts() {
    let base = FrozenDoc::new().set_item("a", 1);
    assert!(base.add("a", 2).unwrap_err().is_duplicate_key());
    assert!(base.add_range([("a", 2)]).unwrap_err().is_duplicate_key());
}

#[test]
fn test_identity_is_read_only() {
    let frozen = FrozenDoc::from_mutable(&Doc::new().with("title", "x"));
    assert_eq!(frozen.id(), "0");
    assert_eq!(frozen.parent_id(), "0");
    assert_eq!(frozen.parent_type(), "");
    assert!(frozen.is_root_object());
    assert!(!frozen.contains_key("id"));
    assert!(!frozen.contains_key("parentid"));
}

#[test]
fn test_mutable_source_edits_do_not_leak() {
    let mut doc = sample_response();
    let frozen = doc.freeze();

    doc.get_list_and_create_if_missing("tags")
        .unwrap()
        .push(Value::from("c"));
    if let Some(Value::Document(owner)) = doc.get_mut("owner") {
        owner.set("name", "Changed");
    }

    assert_eq!(frozen.get("tags"), Some(&FrozenValue::from(vec!["a", "b"])));
    let owner = frozen.get("owner").and_then(FrozenValue::as_document).unwrap();
    assert_eq!(owner.get_string_or_empty("name"), "Kari");
}

#[test]
fn test_concurrent_reads_of_one_snapshot() {
    let frozen = Arc::new(FrozenDoc::from_mutable(&sample_response()));
    let handles: Vec<_> = (0..4i64)
        .map(|i| {
            let snapshot = Arc::clone(&frozen);
            thread::spawn(move || {
                let edited = snapshot.set_item("worker", i);
                (snapshot.id(), edited.get_number_or_default("worker"))
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (id, worker) = handle.join().unwrap();
        assert_eq!(id, "100");
        assert_eq!(worker, i as i64);
    }
    assert!(!frozen.contains_key("worker"));
}

#[test]
fn test_serde_round_trip() {
    let frozen = FrozenDoc::from_mutable(&sample_response());
    let text = serde_json::to_string(&frozen).unwrap();
    let back: FrozenDoc = serde_json::from_str(&text).unwrap();
    assert_eq!(back, frozen);
}
