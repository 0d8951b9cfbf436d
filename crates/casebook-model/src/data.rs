//! Shape-decided view of a case's `field_data`.
//!
//! The platform stores `field_data` in two shapes: the structured v2 form
//! nests fields under module-name keys, while legacy records keep one flat
//! mapping. [`CaseData::from_field_data`] decides the shape exactly once so
//! downstream code never re-sniffs the mapping.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::metadata::{CaseMetadata, is_reserved_key};

/// A JSON object holding patient fields.
pub type FieldMap = serde_json::Map<String, Value>;

/// `field_data` after the one-time shape decision.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseData {
    /// Structured v2 shape: fields arrive pre-grouped under module-name keys.
    Structured {
        /// Module name -> field set, taken verbatim from the record.
        modules: BTreeMap<String, FieldMap>,
        /// Non-reserved top-level keys whose values were not objects. The
        /// platform's structured writer never produces these; when they occur
        /// they are surfaced here rather than silently ignored.
        stray_fields: Vec<String>,
    },
    /// Flat legacy shape: module membership must be inferred per field.
    Legacy {
        /// All non-reserved fields, verbatim.
        fields: FieldMap,
        /// Module list the record declares, in declaration order. Buckets are
        /// pre-created for exactly these names during classification.
        declared_modules: Vec<String>,
    },
}

impl CaseData {
    /// Decide the shape of a `field_data` mapping and extract its metadata.
    ///
    /// Pure projection: the input is read, never mutated, and no patient
    /// field is lost — reserved keys feed the metadata view, structured
    /// non-object keys go to `stray_fields`, everything else lands in the
    /// data itself.
    pub fn from_field_data(field_data: &FieldMap) -> (Self, CaseMetadata) {
        let metadata = CaseMetadata::from_field_data(field_data);
        let data = if metadata.is_structured() {
            let mut modules = BTreeMap::new();
            let mut stray_fields = Vec::new();
            for (key, value) in field_data {
                if is_reserved_key(key) {
                    continue;
                }
                match value {
                    Value::Object(fields) => {
                        modules.insert(key.clone(), fields.clone());
                    }
                    _ => stray_fields.push(key.clone()),
                }
            }
            CaseData::Structured {
                modules,
                stray_fields,
            }
        } else {
            let fields = field_data
                .iter()
                .filter(|(key, _)| !is_reserved_key(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            CaseData::Legacy {
                fields,
                declared_modules: metadata.modules_used.clone().unwrap_or_default(),
            }
        };
        (data, metadata)
    }

    /// True for the structured v2 shape.
    pub fn is_structured(&self) -> bool {
        matches!(self, CaseData::Structured { .. })
    }

    /// Count of patient fields carried by this shape.
    ///
    /// Structured counts the fields inside module groups (stray keys are not
    /// fields); legacy counts the flat mapping.
    pub fn field_count(&self) -> usize {
        match self {
            CaseData::Structured { modules, .. } => {
                modules.values().map(serde_json::Map::len).sum()
            }
            CaseData::Legacy { fields, .. } => fields.len(),
        }
    }
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
    fn structured_shape_groups_object_values() {
        let data = field_data(json!({
            "_metadata": { "data_structure_version": "2.0" },
            "basic_information": { "full_name": "Sam" },
            "work_career": { "work_stress": "high" },
            "loose_note": "not an object"
        }));
        let (case_data, metadata) = CaseData::from_field_data(&data);
        assert!(metadata.is_structured());
        match case_data {
            CaseData::Structured {
                modules,
                stray_fields,
            } => {
                assert_eq!(modules.len(), 2);
                assert_eq!(
                    modules["basic_information"].get("full_name"),
                    Some(&json!("Sam"))
                );
                assert_eq!(stray_fields, vec!["loose_note".to_string()]);
            }
            CaseData::Legacy { .. } => panic!("expected structured shape"),
        }
    }

    #[test]
    fn arrays_are_not_module_groups() {
        let data = field_data(json!({
            "_metadata": { "data_structure_version": "2.0" },
            "session_tags": ["anxiety", "sleep"]
        }));
        let (case_data, _) = CaseData::from_field_data(&data);
        match case_data {
            CaseData::Structured {
                modules,
                stray_fields,
            } => {
                assert!(modules.is_empty());
                assert_eq!(stray_fields, vec!["session_tags".to_string()]);
            }
            CaseData::Legacy { .. } => panic!("expected structured shape"),
        }
    }

    #[test]
    fn legacy_shape_keeps_flat_fields_and_declared_modules() {
        let data = field_data(json!({
            "_modules_used": ["basic_information", "work_career"],
            "full_name": "Sam",
            "work_stress": "high"
        }));
        let (case_data, _) = CaseData::from_field_data(&data);
        match case_data {
            CaseData::Legacy {
                fields,
                declared_modules,
            } => {
                assert_eq!(fields.len(), 2);
                assert_eq!(declared_modules, vec!["basic_information", "work_career"]);
            }
            CaseData::Structured { .. } => panic!("expected legacy shape"),
        }
    }

    #[test]
    fn field_count_matches_shape() {
        let structured = field_data(json!({
            "_metadata": { "data_structure_version": "2.0" },
            "basic_information": { "full_name": "Sam", "age": 30 },
            "ignored_scalar": 7
        }));
        let (case_data, _) = CaseData::from_field_data(&structured);
        assert_eq!(case_data.field_count(), 2);

        let legacy = field_data(json!({ "full_name": "Sam", "age": 30 }));
        let (case_data, _) = CaseData::from_field_data(&legacy);
        assert_eq!(case_data.field_count(), 2);
    }
}
