//! Behavior contract for the field classifier.
//!
//! The keyword order and gating rules here are load-bearing for the admin
//! UI; these tests pin them exactly.

use serde_json::{Value, json};

use casebook_classify::{PatientSummary, classify, summarize};
use casebook_model::FieldMap;

fn field_data(value: Value) -> FieldMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn structured_detection_requires_the_exact_version_string() {
    let structured = field_data(json!({
        "_metadata": { "data_structure_version": "2.0" }
    }));
    assert!(classify(&structured).structured);

    for raw in [
        json!({ "_metadata": { "data_structure_version": "2.1" } }),
        json!({ "_metadata": { "data_structure_version": 2.0 } }),
        json!({ "_metadata": {} }),
        json!({}),
    ] {
        let data = field_data(raw);
        assert!(!classify(&data).structured, "input: {data:?}");
    }
}

#[test]
fn unmatched_keys_default_to_basic_information() {
    let data = field_data(json!({ "favorite_color": "green" }));
    let result = classify(&data);
    assert_eq!(
        result.modules["basic_information"].get("favorite_color"),
        Some(&json!("green"))
    );
}

#[test]
fn overlapping_keys_follow_group_priority() {
    // "work_emotion" matches both cognitive_emotional_patterns ("emotion")
    // and work_career ("work"). Both buckets are declared, so the assignment
    // pins the group testing order: the emotion group runs first.
    let data = field_data(json!({
        "_modules_used": ["cognitive_emotional_patterns", "work_career"],
        "work_emotion": "dread on Sunday evenings"
    }));
    let result = classify(&data);
    assert_eq!(
        result.modules["cognitive_emotional_patterns"].get("work_emotion"),
        Some(&json!("dread on Sunday evenings"))
    );
    assert!(result.modules["work_career"].is_empty());
}

#[test]
fn legacy_worked_example() {
    let data = field_data(json!({
        "full_name": "Sam",
        "age": 30,
        "work_stress": "high",
        "_modules_used": ["basic_information", "work_career"]
    }));
    let result = classify(&data);

    assert!(!result.structured);
    // "full_name" and "age" both hit the basic_information keyword list;
    // "age" is placed by keyword match, not by fallback.
    assert_eq!(
        result.modules["basic_information"],
        field_data(json!({ "full_name": "Sam", "age": 30 }))
    );
    assert_eq!(
        result.modules["work_career"],
        field_data(json!({ "work_stress": "high" }))
    );
    assert_eq!(result.field_count(), 3);
}

#[test]
fn structured_worked_example() {
    let data = field_data(json!({
        "basic_information": { "full_name": "Sam" },
        "_metadata": { "data_structure_version": "2.0" }
    }));
    let result = classify(&data);
    assert!(result.structured);
    assert_eq!(
        result.modules["basic_information"],
        field_data(json!({ "full_name": "Sam" }))
    );
    assert_eq!(
        result.metadata,
        field_data(json!({ "data_structure_version": "2.0" }))
    );
}

#[test]
fn structured_strays_are_surfaced_not_bucketed() {
    let data = field_data(json!({
        "_metadata": { "data_structure_version": "2.0" },
        "basic_information": { "full_name": "Sam" },
        "intake_channel": "referral",
        "session_count": 4
    }));
    let result = classify(&data);
    assert_eq!(result.field_count(), 1);
    assert_eq!(
        result.stray_fields,
        vec!["intake_channel".to_string(), "session_count".to_string()]
    );
    for bucket in result.modules.values() {
        assert!(!bucket.contains_key("intake_channel"));
        assert!(!bucket.contains_key("session_count"));
    }
}

#[test]
fn empty_field_data_summary_is_all_defaults() {
    let summary = summarize(&FieldMap::new());
    assert_eq!(
        summary,
        PatientSummary {
            full_name: "Unknown Patient".to_string(),
            age: "Unknown".to_string(),
            gender: "Unknown".to_string(),
            presenting_concern: "Not specified".to_string(),
        }
    );
}

#[test]
fn classification_serializes_for_machine_output() {
    let data = field_data(json!({
        "full_name": "Sam",
        "_modules_used": ["basic_information"]
    }));
    let result = classify(&data);
    let round: casebook_classify::Classification =
        serde_json::from_value(serde_json::to_value(&result).unwrap()).unwrap();
    assert_eq!(round, result);
}
