//! Audit reporting over classified patient cases.
//!
//! The audit answers the admin question "is this case set ready for
//! training?": every case is classified, checked for fields the UI would
//! not display (stray structured scalars, empty buckets, unknown module
//! declarations, missing identity), and the set is cross-checked for
//! duplicate ids. Findings carry stable `CB`-prefixed codes so downstream
//! tooling can filter on them.

#![deny(unsafe_code)]

pub mod audit;
pub mod issue;

pub use audit::{AuditReport, CaseAudit, audit_case, audit_cases};
pub use issue::{AuditIssue, IssueSeverity, codes};
