use serde::{Deserialize, Serialize};

/// How serious an audit finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Stable issue codes emitted by the case audit.
///
/// `CB0xx` codes describe a single case; `CB1xx` codes describe the case set.
pub mod codes {
    /// Structured record carries a non-object top-level field that belongs to
    /// no module bucket.
    pub const STRAY_FIELD: &str = "CB001";
    /// A module name the platform does not define, either declared in
    /// `_modules_used` or appearing as a structured bucket key.
    pub const UNKNOWN_MODULE: &str = "CB002";
    /// A module bucket exists but holds no fields.
    pub const EMPTY_MODULE: &str = "CB003";
    /// No usable patient name survived summary extraction.
    pub const NO_IDENTITY: &str = "CB004";
    /// Two cases in the audited set share an id.
    pub const DUPLICATE_ID: &str = "CB101";
}

/// One audit finding on a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditIssue {
    /// Issue code from [`codes`].
    pub code: String,
    /// Human-readable message describing the finding.
    pub message: String,
    /// Severity level.
    pub severity: IssueSeverity,
    /// Module bucket the finding concerns, if any.
    pub module: Option<String>,
}

impl AuditIssue {
    /// Warning-level finding.
    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: IssueSeverity::Warning,
            module: None,
        }
    }

    /// Error-level finding.
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: IssueSeverity::Error,
            module: None,
        }
    }

    /// Attach the module bucket the finding concerns.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}
