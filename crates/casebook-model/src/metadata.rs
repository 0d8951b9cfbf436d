//! Reserved metadata keys inside `field_data`.
//!
//! Keys starting with `_` are reserved for the platform and are never patient
//! fields. `_metadata` carries the record format descriptor; `_modules_used`
//! is the older top-level location for the module list, written by case forms
//! that predate `_metadata`.

use serde_json::Value;

use crate::data::FieldMap;

/// Prefix marking a `field_data` key as reserved (non-patient) data.
pub const RESERVED_PREFIX: char = '_';

/// Key of the metadata object inside `field_data`.
pub const METADATA_KEY: &str = "_metadata";

/// Legacy top-level location of the module list.
pub const MODULES_USED_KEY: &str = "_modules_used";

/// `data_structure_version` value marking the structured (pre-grouped) shape.
pub const STRUCTURED_DATA_VERSION: &str = "2.0";

/// True for keys that must never be treated as patient fields.
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX)
}

/// Typed view of a case's `_metadata` object.
///
/// `raw` preserves the metadata object verbatim (including keys this crate
/// does not know about); the typed fields are best-effort reads and never
/// fail — absent or mistyped entries read as `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseMetadata {
    /// Verbatim `_metadata` contents; empty when the key is absent.
    pub raw: FieldMap,
    /// Format version string, e.g. `"2.0"`. Only the exact string form
    /// counts; a JSON number `2.0` does not mark a record as structured.
    pub data_structure_version: Option<String>,
    /// Declared module list, resolved across both storage locations:
    /// `_metadata.modules_used` wins when present (even when empty),
    /// otherwise the top-level `_modules_used` array is used.
    pub modules_used: Option<Vec<String>>,
    /// Name of the form template the case was generated from.
    pub template_used: Option<String>,
    /// Origin marker written by the case generator.
    pub created_via: Option<String>,
}

impl CaseMetadata {
    /// Extract metadata from a `field_data` mapping. Never fails; malformed
    /// metadata degrades to an empty/partial view.
    pub fn from_field_data(field_data: &FieldMap) -> Self {
        let raw = match field_data.get(METADATA_KEY) {
            Some(Value::Object(map)) => map.clone(),
            _ => FieldMap::new(),
        };
        let modules_used = match raw.get("modules_used") {
            Some(Value::Array(entries)) => Some(string_entries(entries)),
            _ => match field_data.get(MODULES_USED_KEY) {
                Some(Value::Array(entries)) => Some(string_entries(entries)),
                _ => None,
            },
        };
        Self {
            data_structure_version: string_field(&raw, "data_structure_version"),
            template_used: string_field(&raw, "template_used"),
            created_via: string_field(&raw, "created_via"),
            modules_used,
            raw,
        }
    }

    /// True iff the record declares the structured v2 shape.
    pub fn is_structured(&self) -> bool {
        self.data_structure_version.as_deref() == Some(STRUCTURED_DATA_VERSION)
    }
}

fn string_field(map: &FieldMap, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_entries(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn field_data(value: serde_json::Value) -> FieldMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn reads_structured_marker_from_exact_string() {
        let data = field_data(json!({
            "_metadata": { "data_structure_version": "2.0" }
        }));
        assert!(CaseMetadata::from_field_data(&data).is_structured());

        // A numeric 2.0 is not the marker.
        let numeric = field_data(json!({
            "_metadata": { "data_structure_version": 2.0 }
        }));
        assert!(!CaseMetadata::from_field_data(&numeric).is_structured());

        let other = field_data(json!({
            "_metadata": { "data_structure_version": "1.0" }
        }));
        assert!(!CaseMetadata::from_field_data(&other).is_structured());
    }

    #[test]
    fn metadata_location_wins_over_legacy_location() {
        let data = field_data(json!({
            "_metadata": { "modules_used": ["work_career"] },
            "_modules_used": ["family_dynamics"]
        }));
        let metadata = CaseMetadata::from_field_data(&data);
        assert_eq!(metadata.modules_used, Some(vec!["work_career".to_string()]));
    }

    #[test]
    fn empty_metadata_list_still_wins() {
        let data = field_data(json!({
            "_metadata": { "modules_used": [] },
            "_modules_used": ["family_dynamics"]
        }));
        let metadata = CaseMetadata::from_field_data(&data);
        assert_eq!(metadata.modules_used, Some(vec![]));
    }

    #[test]
    fn falls_back_to_legacy_location() {
        let data = field_data(json!({ "_modules_used": ["trauma_history"] }));
        let metadata = CaseMetadata::from_field_data(&data);
        assert_eq!(
            metadata.modules_used,
            Some(vec!["trauma_history".to_string()])
        );
    }

    #[test]
    fn missing_metadata_reads_as_empty() {
        let data = field_data(json!({ "full_name": "Sam" }));
        let metadata = CaseMetadata::from_field_data(&data);
        assert!(metadata.raw.is_empty());
        assert_eq!(metadata.modules_used, None);
        assert!(!metadata.is_structured());
    }

    #[test]
    fn preserves_unknown_metadata_keys_in_raw() {
        let data = field_data(json!({
            "_metadata": {
                "data_structure_version": "2.0",
                "template_used": "intake_v3",
                "reviewed_by": "supervisor-7"
            }
        }));
        let metadata = CaseMetadata::from_field_data(&data);
        assert_eq!(metadata.template_used.as_deref(), Some("intake_v3"));
        assert_eq!(
            metadata.raw.get("reviewed_by"),
            Some(&json!("supervisor-7"))
        );
    }
}
