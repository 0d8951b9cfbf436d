use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The seven case modules the training platform groups patient fields under.
///
/// The variant order is load-bearing: it is the priority order in which the
/// classifier tests keyword groups against legacy field names, and the display
/// order for module buckets. Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// Identity and intake fields (name, age, gender, contact details,
    /// presenting concern).
    BasicInformation,
    /// Observable behaviors, habits, and routines.
    BehavioralPatterns,
    /// Thought and emotion patterns reported by the patient.
    CognitiveEmotionalPatterns,
    /// Employment and career history.
    WorkCareer,
    /// Family relationships and dynamics.
    FamilyDynamics,
    /// Traumatic events and incident history.
    TraumaHistory,
    /// Diagnoses, prior therapy, and medication history.
    MentalHealthHistory,
}

impl Module {
    /// All modules in classifier priority order.
    pub const ALL: [Module; 7] = [
        Module::BasicInformation,
        Module::BehavioralPatterns,
        Module::CognitiveEmotionalPatterns,
        Module::WorkCareer,
        Module::FamilyDynamics,
        Module::TraumaHistory,
        Module::MentalHealthHistory,
    ];

    /// The canonical key used for this module in `field_data` and bucket maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::BasicInformation => "basic_information",
            Module::BehavioralPatterns => "behavioral_patterns",
            Module::CognitiveEmotionalPatterns => "cognitive_emotional_patterns",
            Module::WorkCareer => "work_career",
            Module::FamilyDynamics => "family_dynamics",
            Module::TraumaHistory => "trauma_history",
            Module::MentalHealthHistory => "mental_health_history",
        }
    }

    /// Human-readable title for table headers and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Module::BasicInformation => "Basic Information",
            Module::BehavioralPatterns => "Behavioral Patterns",
            Module::CognitiveEmotionalPatterns => "Cognitive & Emotional Patterns",
            Module::WorkCareer => "Work & Career",
            Module::FamilyDynamics => "Family Dynamics",
            Module::TraumaHistory => "Trauma History",
            Module::MentalHealthHistory => "Mental Health History",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Module {
    type Err = ModelError;

    /// Parse a module key as it appears in case data (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Module::ALL
            .into_iter()
            .find(|module| module.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownModule(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_fixed() {
        let names: Vec<&str> = Module::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "basic_information",
                "behavioral_patterns",
                "cognitive_emotional_patterns",
                "work_career",
                "family_dynamics",
                "trauma_history",
                "mental_health_history",
            ]
        );
    }

    #[test]
    fn round_trips_through_str() {
        for module in Module::ALL {
            assert_eq!(module.as_str().parse::<Module>().unwrap(), module);
        }
        assert!("supervision_notes".parse::<Module>().is_err());
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&Module::WorkCareer).unwrap();
        assert_eq!(json, "\"work_career\"");
        let module: Module = serde_json::from_str("\"trauma_history\"").unwrap();
        assert_eq!(module, Module::TraumaHistory);
    }
}
