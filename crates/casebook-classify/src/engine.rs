//! Field classifier implementation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use casebook_model::{CaseData, CaseMetadata, FieldMap, Module};

use crate::keywords::KEYWORD_GROUPS;

/// Result of classifying one case's `field_data`.
///
/// Pure projection of the input: values pass through unmodified, metadata
/// keys never appear in buckets, and no patient field is dropped. Buckets are
/// keyed by module-name string rather than [`Module`] because structured
/// records may name modules this crate does not know yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Module name -> assigned field set.
    pub modules: BTreeMap<String, FieldMap>,
    /// Verbatim `_metadata` contents (empty when absent).
    pub metadata: FieldMap,
    /// True iff the structured branch was taken.
    pub structured: bool,
    /// Structured-branch top-level keys excluded from every bucket because
    /// their values were not objects. Always empty on the legacy branch,
    /// which guarantees placement instead.
    pub stray_fields: Vec<String>,
}

impl Classification {
    /// Project a shape-decided case into module buckets.
    pub fn from_case_data(data: &CaseData, metadata: &CaseMetadata) -> Self {
        match data {
            CaseData::Structured {
                modules,
                stray_fields,
            } => {
                if !stray_fields.is_empty() {
                    tracing::warn!(
                        "structured case leaves {} top-level field(s) outside every module: {:?}",
                        stray_fields.len(),
                        stray_fields
                    );
                }
                Self {
                    modules: modules.clone(),
                    metadata: metadata.raw.clone(),
                    structured: true,
                    stray_fields: stray_fields.clone(),
                }
            }
            CaseData::Legacy {
                fields,
                declared_modules,
            } => Self {
                modules: assign_legacy_fields(fields, declared_modules),
                metadata: metadata.raw.clone(),
                structured: false,
                stray_fields: Vec::new(),
            },
        }
    }

    /// Fields assigned to one of the canonical modules, if that bucket exists.
    pub fn module_fields(&self, module: Module) -> Option<&FieldMap> {
        self.modules.get(module.as_str())
    }

    /// Total fields across all buckets.
    pub fn field_count(&self) -> usize {
        self.modules.values().map(serde_json::Map::len).sum()
    }

    /// Bucket names in display order: the canonical seven first (those
    /// present), then any other module names in sorted order.
    pub fn ordered_modules(&self) -> Vec<&str> {
        let mut ordered: Vec<&str> = Module::ALL
            .iter()
            .map(|module| module.as_str())
            .filter(|name| self.modules.contains_key(*name))
            .collect();
        ordered.extend(
            self.modules
                .keys()
                .map(String::as_str)
                .filter(|name| Module::ALL.iter().all(|module| module.as_str() != *name)),
        );
        ordered
    }
}

/// Classify a `field_data` mapping into module buckets.
///
/// Decides the record shape once (structured v2 vs flat legacy) and projects
/// it. The function has no failure path: malformed input degrades to
/// "everything in `basic_information`", never an error.
pub fn classify(field_data: &FieldMap) -> Classification {
    let (data, metadata) = CaseData::from_field_data(field_data);
    Classification::from_case_data(&data, &metadata)
}

/// Legacy-branch assignment: pre-created buckets from the declared module
/// list, then keyword scanning per field.
///
/// A keyword match only assigns when its bucket was pre-created; a match
/// against a missing bucket is a miss and scanning continues with the
/// lower-priority groups. Keys with no surviving match land in
/// `basic_information`, created on demand — no key is ever dropped.
fn assign_legacy_fields(
    fields: &FieldMap,
    declared_modules: &[String],
) -> BTreeMap<String, FieldMap> {
    let fallback = Module::BasicInformation.as_str();
    let mut modules: BTreeMap<String, FieldMap> = BTreeMap::new();
    for name in declared_modules {
        modules.entry(name.clone()).or_default();
    }
    for (key, value) in fields {
        let target = KEYWORD_GROUPS
            .iter()
            .filter(|group| group.matches(key))
            .map(|group| group.module.as_str())
            .find(|name| modules.contains_key(*name))
            .unwrap_or(fallback);
        modules
            .entry(target.to_string())
            .or_default()
            .insert(key.clone(), value.clone());
    }
    modules
}
