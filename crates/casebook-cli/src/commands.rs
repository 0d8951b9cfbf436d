use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use casebook_classify::{classify, summarize_classified};
use casebook_cli::render::{
    CaseRow, audit_summary_table, case_list_table, features_table, inspect_table, issue_table,
};
use casebook_model::PatientCase;
use casebook_report::{AuditReport, audit_cases};
use casebook_session::SessionConfig;
use casebook_store::{CaseStore, JsonDirStore, JsonFileKv};

use crate::cli::{FeaturesArgs, InspectArgs, ListArgs, ReportArgs};

pub fn run_inspect(args: &InspectArgs, show_values: bool) -> Result<()> {
    let case = load_case(&args.case_file)?;
    let span = info_span!("inspect", case_id = %case.id);
    let _guard = span.enter();

    let classification = classify(&case.field_data);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    let summary = summarize_classified(&case.field_data, &classification);
    println!("Case: {} ({})", case.case_name, case.id);
    println!("Status: {}", case.status);
    println!(
        "Layout: {}",
        if classification.structured {
            "structured v2"
        } else {
            "legacy"
        }
    );
    if show_values {
        println!(
            "Patient: {} | age {} | {} | {}",
            summary.full_name, summary.age, summary.gender, summary.presenting_concern
        );
    }
    println!("{}", inspect_table(&classification, show_values));
    if !classification.metadata.is_empty() {
        println!("Metadata: {}", serde_json::to_string(&classification.metadata)?);
    }
    if !classification.stray_fields.is_empty() {
        println!(
            "Stray fields (outside every module): {}",
            classification.stray_fields.join(", ")
        );
    }
    Ok(())
}

pub fn run_list(args: &ListArgs, show_values: bool) -> Result<()> {
    let store = JsonDirStore::open(&args.case_dir).context("open case store")?;
    let cases = store.list().context("load cases")?;
    info!(
        "Loaded {} case(s) from {}",
        cases.len(),
        args.case_dir.display()
    );

    let rows: Vec<CaseRow> = cases
        .iter()
        .map(|case| CaseRow::from_case(case, show_values))
        .collect();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("No cases found in {}", args.case_dir.display());
        return Ok(());
    }
    println!("{}", case_list_table(&rows));
    Ok(())
}

pub fn run_report(args: &ReportArgs) -> Result<AuditReport> {
    let store = JsonDirStore::open(&args.case_dir).context("open case store")?;
    let cases = store.list().context("load cases")?;
    let span = info_span!("audit", cases = cases.len());
    let _guard = span.enter();

    let report = audit_cases(&cases);
    info!(
        "Audited {} case(s): {} error(s), {} warning(s)",
        report.audits.len(),
        report.error_count(),
        report.warning_count()
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report);
    }

    println!(
        "Cases: {}  Errors: {}  Warnings: {}",
        report.audits.len(),
        report.error_count(),
        report.warning_count()
    );
    println!("{}", audit_summary_table(&report));
    if let Some(table) = issue_table(&report) {
        println!();
        println!("Issues:");
        println!("{table}");
    }
    Ok(report)
}

pub fn run_features(args: &FeaturesArgs) -> Result<()> {
    let config = match &args.store {
        Some(path) => {
            let kv = JsonFileKv::open(path).context("open settings store")?;
            SessionConfig::load(&kv).context("load session configuration")?
        }
        None => SessionConfig::default(),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }
    println!("{}", features_table(&config));
    Ok(())
}

fn load_case(path: &Path) -> Result<PatientCase> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read case file {}", path.display()))?;
    let case: PatientCase = serde_json::from_str(&raw)
        .with_context(|| format!("parse case file {}", path.display()))?;
    Ok(case)
}
