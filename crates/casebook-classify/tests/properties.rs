//! Property tests for the classifier's two standing guarantees: no field is
//! ever dropped, and classification is a pure function of its input.

use proptest::prelude::*;
use serde_json::{Value, json};

use casebook_classify::classify;
use casebook_model::{FieldMap, Module};

fn field_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}(_[a-z]{1,8}){0,2}",
        prop::sample::select(vec![
            "full_name",
            "age",
            "gender",
            "work_stress",
            "family_history",
            "emotion_log",
            "habit_tracker",
            "therapy_notes",
            "trauma_timeline",
            "favorite_color",
        ])
        .prop_map(str::to_string),
    ]
}

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z ]{0,16}".prop_map(Value::String),
        prop::collection::vec("[a-z]{1,6}", 0..3).prop_map(|items| json!(items)),
    ]
}

fn declared_modules() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(Module::ALL.to_vec()).prop_map(|m| m.as_str().to_string()),
            Just("supervision_extra".to_string()),
        ],
        0..5,
    )
}

fn legacy_field_data() -> impl Strategy<Value = FieldMap> {
    (
        prop::collection::btree_map(field_key(), field_value(), 0..12),
        proptest::option::of(declared_modules()),
        any::<bool>(),
    )
        .prop_map(|(fields, declared, reserved_extra)| {
            let mut map = FieldMap::new();
            for (key, value) in fields {
                map.insert(key, value);
            }
            if let Some(declared) = declared {
                map.insert("_modules_used".to_string(), json!(declared));
            }
            if reserved_extra {
                map.insert("_export_marker".to_string(), json!(true));
            }
            map
        })
}

fn structured_field_data() -> impl Strategy<Value = FieldMap> {
    (
        prop::collection::btree_map(
            prop_oneof![
                prop::sample::select(Module::ALL.to_vec()).prop_map(|m| m.as_str().to_string()),
                Just("aftercare_plan".to_string()),
            ],
            prop::collection::btree_map(field_key(), field_value(), 0..6),
            0..5,
        ),
        prop::collection::btree_map(field_key(), field_value(), 0..3),
    )
        .prop_map(|(groups, extras)| {
            let mut map = FieldMap::new();
            map.insert(
                "_metadata".to_string(),
                json!({ "data_structure_version": "2.0" }),
            );
            for (name, fields) in groups {
                map.insert(name, Value::Object(fields.into_iter().collect()));
            }
            for (key, value) in extras {
                // Skip collisions with module groups so the expected counts
                // below can be read straight off the final map.
                map.entry(key).or_insert(value);
            }
            map
        })
}

fn any_field_data() -> impl Strategy<Value = FieldMap> {
    prop_oneof![legacy_field_data(), structured_field_data()]
}

proptest! {
    #[test]
    fn legacy_branch_never_drops_a_field(data in legacy_field_data()) {
        let result = classify(&data);
        prop_assert!(!result.structured);

        let input_fields = data.keys().filter(|key| !key.starts_with('_')).count();
        prop_assert_eq!(result.field_count(), input_fields);

        // Each input field lands in exactly one bucket.
        for key in data.keys().filter(|key| !key.starts_with('_')) {
            let holders = result
                .modules
                .values()
                .filter(|bucket| bucket.contains_key(key))
                .count();
            prop_assert_eq!(holders, 1, "field {} in {} buckets", key, holders);
        }
    }

    #[test]
    fn structured_branch_accounts_for_every_key(data in structured_field_data()) {
        let result = classify(&data);
        prop_assert!(result.structured);

        let expected_fields: usize = data
            .iter()
            .filter(|(key, _)| !key.starts_with('_'))
            .filter_map(|(_, value)| value.as_object())
            .map(serde_json::Map::len)
            .sum();
        prop_assert_eq!(result.field_count(), expected_fields);

        let expected_strays: Vec<String> = data
            .iter()
            .filter(|(key, value)| !key.starts_with('_') && !value.is_object())
            .map(|(key, _)| key.clone())
            .collect();
        prop_assert_eq!(&result.stray_fields, &expected_strays);
    }

    #[test]
    fn classification_is_idempotent(data in any_field_data()) {
        prop_assert_eq!(classify(&data), classify(&data));
    }

    #[test]
    fn reserved_keys_never_reach_buckets(data in any_field_data()) {
        let result = classify(&data);
        for bucket in result.modules.values() {
            for key in bucket.keys() {
                prop_assert!(!key.starts_with('_'), "reserved key {} bucketed", key);
            }
        }
    }

    #[test]
    fn input_is_never_mutated(data in any_field_data()) {
        let before = data.clone();
        let _ = classify(&data);
        prop_assert_eq!(data, before);
    }
}
