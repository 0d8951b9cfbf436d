//! Display-ready patient summaries.
//!
//! The admin case list and the session header both show four identity fields
//! for every case. Lookups run against the classified `basic_information`
//! bucket for structured records and against the flat top-level mapping for
//! legacy records, with the same fallback chain in both paths. Every field
//! defaults to a display literal — the UI never renders an empty value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use casebook_model::{FieldMap, Module, PatientCase};

use crate::engine::{Classification, classify};

/// Default shown when no usable name field exists.
pub const UNKNOWN_PATIENT: &str = "Unknown Patient";
/// Default for age and gender.
pub const UNKNOWN: &str = "Unknown";
/// Default for the presenting concern.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Flat, display-ready identity summary for one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub full_name: String,
    pub age: String,
    pub gender: String,
    pub presenting_concern: String,
}

impl PatientSummary {
    /// A summary consisting entirely of defaults.
    pub fn unknown() -> Self {
        Self {
            full_name: UNKNOWN_PATIENT.to_string(),
            age: UNKNOWN.to_string(),
            gender: UNKNOWN.to_string(),
            presenting_concern: NOT_SPECIFIED.to_string(),
        }
    }

    /// True when no identity field survived extraction.
    pub fn is_placeholder(&self) -> bool {
        self.full_name == UNKNOWN_PATIENT
    }
}

/// Extract the display summary for a `field_data` mapping.
pub fn summarize(field_data: &FieldMap) -> PatientSummary {
    summarize_classified(field_data, &classify(field_data))
}

/// Extract the display summary for a full case record.
pub fn summarize_case(case: &PatientCase) -> PatientSummary {
    summarize(&case.field_data)
}

/// Summary extraction against an already-computed classification, to avoid
/// classifying twice when the caller needs both.
pub fn summarize_classified(
    field_data: &FieldMap,
    classification: &Classification,
) -> PatientSummary {
    let source = if classification.structured {
        classification.module_fields(Module::BasicInformation)
    } else {
        Some(field_data)
    };
    let Some(source) = source else {
        return PatientSummary::unknown();
    };
    PatientSummary {
        full_name: display_value(source, "full_name")
            .or_else(|| display_value(source, "name"))
            .unwrap_or_else(|| UNKNOWN_PATIENT.to_string()),
        age: age_value(source).unwrap_or_else(|| UNKNOWN.to_string()),
        gender: display_value(source, "gender").unwrap_or_else(|| UNKNOWN.to_string()),
        presenting_concern: display_value(source, "presenting_concern")
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
    }
}

/// Age fallback chain: the nested `age_and_birth.age` field wins, then the
/// plain `age` key.
fn age_value(source: &FieldMap) -> Option<String> {
    if let Some(Value::Object(nested)) = source.get("age_and_birth")
        && let Some(rendered) = display_value(nested, "age")
    {
        return Some(rendered);
    }
    display_value(source, "age")
}

/// Render a field for display. Missing keys, nulls, and blank strings read as
/// absent so the caller's default applies; other scalars render in their JSON
/// form (`30`, `true`).
fn display_value(source: &FieldMap, key: &str) -> Option<String> {
    match source.get(key)? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
