//! Table rendering for the casebook commands.
//!
//! Builders return [`Table`] values so output can be asserted on in tests;
//! the commands print them. Anything derived from patient field values goes
//! through the redaction gate before it reaches a cell.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

use casebook_classify::{Classification, PatientSummary, classify, summarize_classified};
use casebook_model::{CaseStatus, PatientCase};
use casebook_report::{AuditIssue, AuditReport, IssueSeverity};
use casebook_session::SessionConfig;

use crate::logging::{REDACTED_VALUE, redact_value};

/// Longest value preview shown in a table cell.
const VALUE_PREVIEW_MAX: usize = 60;

/// One row of the `list` output, also the `--json` record shape.
#[derive(Debug, Clone, Serialize)]
pub struct CaseRow {
    pub id: String,
    pub case_name: String,
    pub status: CaseStatus,
    pub created_at: DateTime<Utc>,
    pub structured: bool,
    pub field_count: usize,
    pub patient: PatientSummary,
}

impl CaseRow {
    /// Classify and summarize one case for listing.
    ///
    /// The patient summary is redacted here, not at print time, so the
    /// `--json` form obeys the same gate as the table.
    pub fn from_case(case: &PatientCase, show_values: bool) -> Self {
        let classification = classify(&case.field_data);
        let summary = summarize_classified(&case.field_data, &classification);
        Self {
            id: case.id.clone(),
            case_name: case.case_name.clone(),
            status: case.status,
            created_at: case.created_at,
            structured: classification.structured,
            field_count: classification.field_count(),
            patient: shield_summary(&summary, show_values),
        }
    }
}

fn shield_summary(summary: &PatientSummary, show_values: bool) -> PatientSummary {
    PatientSummary {
        full_name: redact_value(&summary.full_name, show_values).to_string(),
        age: redact_value(&summary.age, show_values).to_string(),
        gender: redact_value(&summary.gender, show_values).to_string(),
        presenting_concern: redact_value(&summary.presenting_concern, show_values).to_string(),
    }
}

/// Case listing: one row per case, newest first (store order).
pub fn case_list_table(rows: &[CaseRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Status"),
        header_cell("Created"),
        header_cell("Layout"),
        header_cell("Fields"),
        header_cell("Patient"),
        header_cell("Age"),
        header_cell("Concern"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            id_cell(&row.id),
            Cell::new(&row.case_name),
            status_cell(row.status),
            Cell::new(row.created_at.format("%Y-%m-%d")),
            layout_cell(row.structured),
            Cell::new(row.field_count),
            value_or_dim(&row.patient.full_name),
            value_or_dim(&row.patient.age),
            value_or_dim(&row.patient.presenting_concern),
        ]);
    }
    table
}

/// Module buckets of one classified case: module, field, value preview.
pub fn inspect_table(classification: &Classification, show_values: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Module"),
        header_cell("Field"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    for name in classification.ordered_modules() {
        let fields = &classification.modules[name];
        if fields.is_empty() {
            table.add_row(vec![module_cell(name), dim_cell("(empty)"), dim_cell("-")]);
            continue;
        }
        let mut first = true;
        for (field, value) in fields {
            let module = if first { module_cell(name) } else { dim_cell("") };
            first = false;
            table.add_row(vec![module, Cell::new(field), value_cell(value, show_values)]);
        }
    }
    table
}

/// Audit overview: one row per case plus a totals row.
pub fn audit_summary_table(report: &AuditReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Name"),
        header_cell("Layout"),
        header_cell("Modules"),
        header_cell("Fields"),
        header_cell("Stray"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_report_table_style(&mut table);
    for index in 3..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_fields = 0usize;
    let mut total_stray = 0usize;
    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    for audit in &report.audits {
        let fields: usize = audit.module_counts.values().sum();
        total_fields += fields;
        total_stray += audit.stray_fields.len();
        total_errors += audit.error_count();
        total_warnings += audit.warning_count();
        table.add_row(vec![
            id_cell(&audit.case_id),
            Cell::new(&audit.case_name),
            layout_cell(audit.structured),
            Cell::new(audit.module_counts.len()),
            Cell::new(fields),
            count_cell(audit.stray_fields.len(), Color::Yellow),
            count_cell(audit.error_count(), Color::Red),
            count_cell(audit.warning_count(), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All cases")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_fields).add_attribute(Attribute::Bold),
        count_cell(total_stray, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total_errors, Color::Red).add_attribute(Attribute::Bold),
        count_cell(total_warnings, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Every audit finding, most severe first.
///
/// Returns `None` when the report is clean so callers can skip the section.
pub fn issue_table(report: &AuditReport) -> Option<Table> {
    let mut issues: Vec<(&str, &AuditIssue)> = Vec::new();
    for audit in &report.audits {
        for issue in &audit.issues {
            issues.push((audit.case_id.as_str(), issue));
        }
    }
    if issues.is_empty() {
        return None;
    }
    issues.sort_by(|a, b| {
        let severity = severity_rank(b.1.severity).cmp(&severity_rank(a.1.severity));
        if severity != Ordering::Equal {
            return severity;
        }
        let case = a.0.cmp(b.0);
        if case != Ordering::Equal {
            return case;
        }
        a.1.code.cmp(&b.1.code)
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Module"),
        header_cell("Message"),
    ]);
    apply_report_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    for (case_id, issue) in issues {
        table.add_row(vec![
            id_cell(case_id),
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            match &issue.module {
                Some(module) => Cell::new(module),
                None => dim_cell("-"),
            },
            Cell::new(&issue.message),
        ]);
    }
    Some(table)
}

/// Effective session configuration: toggles plus voice settings.
pub fn features_table(config: &SessionConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (name, enabled) in config.features.entries() {
        table.add_row(vec![Cell::new(name), flag_cell(enabled)]);
    }
    table.add_row(vec![
        Cell::new("voice.provider"),
        setting_cell(&config.voice.provider),
    ]);
    table.add_row(vec![
        Cell::new("voice.voice_id"),
        setting_cell(&config.voice.voice_id),
    ]);
    table
}

fn value_cell(value: &Value, show_values: bool) -> Cell {
    if !show_values {
        return dim_cell(REDACTED_VALUE);
    }
    let rendered = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    Cell::new(truncate_preview(&rendered))
}

fn truncate_preview(text: &str) -> String {
    if text.chars().count() <= VALUE_PREVIEW_MAX {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(VALUE_PREVIEW_MAX).collect();
    preview.push_str("...");
    preview
}

fn value_or_dim(value: &str) -> Cell {
    if value == REDACTED_VALUE {
        dim_cell(value)
    } else {
        Cell::new(value)
    }
}

fn setting_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("(not set)")
    } else {
        Cell::new(value)
    }
}

fn flag_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn status_cell(status: CaseStatus) -> Cell {
    match status {
        CaseStatus::Draft => Cell::new("draft").fg(Color::Yellow),
        CaseStatus::Active => Cell::new("active").fg(Color::Green),
        CaseStatus::Archived => Cell::new("archived").fg(Color::DarkGrey),
    }
}

fn layout_cell(structured: bool) -> Cell {
    if structured {
        Cell::new("structured").fg(Color::Cyan)
    } else {
        dim_cell("legacy")
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 2,
        IssueSeverity::Warning => 1,
    }
}

fn module_cell(name: &str) -> Cell {
    Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn id_cell(id: &str) -> Cell {
    Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_values_are_truncated_for_preview() {
        let long = "x".repeat(VALUE_PREVIEW_MAX + 10);
        let preview = truncate_preview(&long);
        assert_eq!(preview.chars().count(), VALUE_PREVIEW_MAX + 3);
        assert!(preview.ends_with("..."));

        let short = "panic attacks at work";
        assert_eq!(truncate_preview(short), short);
    }

    #[test]
    fn shielded_summaries_replace_every_field() {
        let summary = PatientSummary {
            full_name: "Sam Ellery".to_string(),
            age: "30".to_string(),
            gender: "non-binary".to_string(),
            presenting_concern: "panic attacks".to_string(),
        };
        let shielded = shield_summary(&summary, false);
        assert_eq!(shielded.full_name, REDACTED_VALUE);
        assert_eq!(shielded.age, REDACTED_VALUE);
        assert_eq!(shielded.gender, REDACTED_VALUE);
        assert_eq!(shielded.presenting_concern, REDACTED_VALUE);

        assert_eq!(shield_summary(&summary, true), summary);
    }
}
