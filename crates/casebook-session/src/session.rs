//! Per-run session context.

use casebook_classify::PatientSummary;
use casebook_model::PatientCase;
use chrono::{DateTime, Utc};

use crate::config::{SessionConfig, VoiceSettings};
use crate::features::ChatFeatures;

/// Everything a single training run carries: which case is being simulated,
/// who the patient presents as, and which features are active.
///
/// Built once at session start from a case record and an explicit
/// [`SessionConfig`]; nothing is read from ambient state afterwards.
#[derive(Debug, Clone)]
pub struct Session {
    pub case_id: String,
    pub case_name: String,
    /// Identity header extracted from the case's basic information.
    pub patient: PatientSummary,
    pub features: ChatFeatures,
    pub voice: VoiceSettings,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Start a session for `case` under `config`.
    pub fn new(case: &PatientCase, config: SessionConfig) -> Self {
        Self {
            case_id: case.id.clone(),
            case_name: case.case_name.clone(),
            patient: casebook_classify::summarize(&case.field_data),
            features: config.features,
            voice: config.voice,
            started_at: Utc::now(),
        }
    }

    /// Whether this session will actually speak: the toggle is on and a
    /// provider is configured.
    pub fn voice_ready(&self) -> bool {
        self.features.voice_replies && self.voice.is_configured()
    }
}
