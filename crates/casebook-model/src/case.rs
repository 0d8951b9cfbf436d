use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::data::FieldMap;
use crate::error::ModelError;

/// Lifecycle status of a patient case in the admin workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Draft,
    Active,
    Archived,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Draft => "draft",
            CaseStatus::Active => "active",
            CaseStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(CaseStatus::Draft),
            "active" => Ok(CaseStatus::Active),
            "archived" => Ok(CaseStatus::Archived),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

/// One simulated patient record, as exported by the training platform.
///
/// `field_data` is an open mapping; its shape (structured v2 vs flat legacy)
/// is decided by [`crate::CaseData::from_field_data`], not here. The record
/// is read-only from the classifier's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientCase {
    pub id: String,
    pub case_name: String,
    #[serde(default)]
    pub case_summary: Option<String>,
    #[serde(default)]
    pub field_data: FieldMap,
    pub status: CaseStatus,
    pub created_at: DateTime<Utc>,
}

impl PatientCase {
    /// New draft case with empty field data, stamped now.
    pub fn new(id: impl Into<String>, case_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            case_name: case_name.into(),
            case_summary: None,
            field_data: FieldMap::new(),
            status: CaseStatus::Draft,
            created_at: Utc::now(),
        }
    }
}

/// Partial update to a case. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CasePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    /// Full replacement of `field_data`; partial field merges are not a
    /// store operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_data: Option<FieldMap>,
}

impl CasePatch {
    pub fn is_empty(&self) -> bool {
        self.case_name.is_none()
            && self.case_summary.is_none()
            && self.status.is_none()
            && self.field_data.is_none()
    }

    /// Apply this patch to a case in place.
    pub fn apply(&self, case: &mut PatientCase) {
        if let Some(case_name) = &self.case_name {
            case.case_name = case_name.clone();
        }
        if let Some(case_summary) = &self.case_summary {
            case.case_summary = Some(case_summary.clone());
        }
        if let Some(status) = self.status {
            case.status = status;
        }
        if let Some(field_data) = &self.field_data {
            case.field_data = field_data.clone();
        }
    }
}
