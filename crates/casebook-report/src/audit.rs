//! Classification audit over cases and case sets.

use std::collections::{BTreeMap, BTreeSet};

use casebook_classify::{classify, summarize_classified};
use casebook_model::{CaseMetadata, Module, PatientCase};
use serde::{Deserialize, Serialize};

use crate::issue::{AuditIssue, IssueSeverity, codes};

/// Audit findings for a single case.
///
/// Field names never carry patient values, so an audit is safe to log and
/// print without redaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseAudit {
    pub case_id: String,
    pub case_name: String,
    /// Whether the case carried the structured v2 layout.
    pub structured: bool,
    /// Field count per module bucket, sorted by bucket name.
    pub module_counts: BTreeMap<String, usize>,
    /// Structured top-level fields that belong to no bucket.
    pub stray_fields: Vec<String>,
    pub issues: Vec<AuditIssue>,
}

impl CaseAudit {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Audit one case in isolation.
///
/// Set-level findings (duplicate ids) only appear through [`audit_cases`].
pub fn audit_case(case: &PatientCase) -> CaseAudit {
    let classification = classify(&case.field_data);
    let metadata = CaseMetadata::from_field_data(&case.field_data);
    let summary = summarize_classified(&case.field_data, &classification);

    let mut issues = Vec::new();

    for key in &classification.stray_fields {
        issues.push(AuditIssue::warning(
            codes::STRAY_FIELD,
            format!("top-level field {key:?} is not a module bucket and was left unclassified"),
        ));
    }

    // Unknown names can arrive two ways: declared in `_modules_used`, or as
    // a bucket key in a structured record. One finding per unique name.
    let mut unknown: BTreeSet<&str> = metadata
        .modules_used
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|name| name.parse::<Module>().is_err())
        .collect();
    if classification.structured {
        unknown.extend(
            classification
                .modules
                .keys()
                .map(String::as_str)
                .filter(|name| name.parse::<Module>().is_err()),
        );
    }
    for name in unknown {
        issues.push(
            AuditIssue::warning(
                codes::UNKNOWN_MODULE,
                format!("module name {name:?} is not a known module"),
            )
            .with_module(name),
        );
    }

    for (module, fields) in &classification.modules {
        if fields.is_empty() {
            issues.push(
                AuditIssue::warning(
                    codes::EMPTY_MODULE,
                    format!("module bucket {module:?} holds no fields"),
                )
                .with_module(module.as_str()),
            );
        }
    }

    if summary.is_placeholder() {
        issues.push(AuditIssue::warning(
            codes::NO_IDENTITY,
            "no usable patient name in basic information",
        ));
    }

    CaseAudit {
        case_id: case.id.clone(),
        case_name: case.case_name.clone(),
        structured: classification.structured,
        module_counts: classification
            .modules
            .iter()
            .map(|(module, fields)| (module.clone(), fields.len()))
            .collect(),
        stray_fields: classification.stray_fields.clone(),
        issues,
    }
}

/// Audit findings across a whole case set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditReport {
    pub audits: Vec<CaseAudit>,
}

impl AuditReport {
    pub fn error_count(&self) -> usize {
        self.audits.iter().map(CaseAudit::error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.audits.iter().map(CaseAudit::warning_count).sum()
    }

    pub fn total_issues(&self) -> usize {
        self.audits.iter().map(|audit| audit.issues.len()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Audit every case and cross-check the set for duplicate ids.
///
/// A duplicated id is flagged on the second and later occurrences, so the
/// first record a reader encounters stays clean.
pub fn audit_cases(cases: &[PatientCase]) -> AuditReport {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut report = AuditReport {
        audits: Vec::with_capacity(cases.len()),
    };
    for case in cases {
        let mut audit = audit_case(case);
        if !seen.insert(case.id.as_str()) {
            audit.issues.push(AuditIssue::error(
                codes::DUPLICATE_ID,
                format!("case id {:?} appears more than once in the set", case.id),
            ));
        }
        report.audits.push(audit);
    }
    report
}
