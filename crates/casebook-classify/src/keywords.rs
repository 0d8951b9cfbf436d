//! Keyword groups for legacy field-name classification.
//!
//! Each module owns a fixed keyword list; a field key belongs to a group when
//! it contains any keyword as a case-sensitive substring. Groups are tested
//! in [`KEYWORD_GROUPS`] order and the first hit wins, so both the group
//! order and the keyword lists are a documented contract — the admin UI
//! depends on today's (sometimes surprising) assignments, e.g. `work_emotion`
//! landing in `cognitive_emotional_patterns` because that group is tested
//! before `work_career`. Do not "fix" perceived misclassifications here.

use casebook_model::Module;

/// One module's keyword list.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub module: Module,
    pub keywords: &'static [&'static str],
}

impl KeywordGroup {
    /// Case-sensitive substring test against a field key.
    pub fn matches(&self, field_key: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| field_key.contains(keyword))
    }
}

/// The classifier's keyword table, in priority order.
pub const KEYWORD_GROUPS: [KeywordGroup; 7] = [
    KeywordGroup {
        module: Module::BasicInformation,
        keywords: &["name", "age", "gender", "contact", "presenting_concern"],
    },
    KeywordGroup {
        module: Module::BehavioralPatterns,
        keywords: &["behavior", "habit", "routine", "pattern"],
    },
    KeywordGroup {
        module: Module::CognitiveEmotionalPatterns,
        keywords: &["emotion", "cognitive", "thought", "feeling"],
    },
    KeywordGroup {
        module: Module::WorkCareer,
        keywords: &["work", "career", "job", "employment"],
    },
    KeywordGroup {
        module: Module::FamilyDynamics,
        keywords: &["family", "relationship", "parent", "sibling"],
    },
    KeywordGroup {
        module: Module::TraumaHistory,
        keywords: &["trauma", "abuse", "incident", "ptsd"],
    },
    KeywordGroup {
        module: Module::MentalHealthHistory,
        keywords: &["mental", "diagnosis", "therapy", "medication"],
    },
];

/// First module (in priority order) whose keyword group matches the key.
pub fn first_matching_module(field_key: &str) -> Option<Module> {
    KEYWORD_GROUPS
        .iter()
        .find(|group| group.matches(field_key))
        .map(|group| group.module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_follows_module_priority() {
        let order: Vec<Module> = KEYWORD_GROUPS.iter().map(|group| group.module).collect();
        assert_eq!(order, Module::ALL.to_vec());
    }

    #[test]
    fn matching_is_substring_and_case_sensitive() {
        assert_eq!(
            first_matching_module("childhood_trauma_detail"),
            Some(Module::TraumaHistory)
        );
        // Uppercase key does not contain the lowercase keyword.
        assert_eq!(first_matching_module("TRAUMA"), None);
        assert_eq!(first_matching_module("favorite_color"), None);
    }

    #[test]
    fn first_group_wins_on_overlap() {
        // "work_emotion" matches both cognitive_emotional_patterns ("emotion")
        // and work_career ("work"); the emotion group is tested first.
        assert_eq!(
            first_matching_module("work_emotion"),
            Some(Module::CognitiveEmotionalPatterns)
        );
        // "age" sits in the basic_information list itself.
        assert_eq!(
            first_matching_module("age"),
            Some(Module::BasicInformation)
        );
    }
}
