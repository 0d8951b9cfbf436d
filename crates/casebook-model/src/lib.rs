//! Core data model for patient-case exports.
//!
//! Cases are JSON records produced by the psychology-training platform. The
//! model owns the record types, the reserved-metadata rules, and the one-time
//! shape decision that turns an open `field_data` mapping into the tagged
//! [`CaseData`] union consumed by the classifier and everything above it.

pub mod case;
pub mod data;
pub mod error;
pub mod metadata;
pub mod module;

pub use case::{CasePatch, CaseStatus, PatientCase};
pub use data::{CaseData, FieldMap};
pub use error::{ModelError, Result};
pub use metadata::{
    CaseMetadata, METADATA_KEY, MODULES_USED_KEY, RESERVED_PREFIX, STRUCTURED_DATA_VERSION,
    is_reserved_key,
};
pub use module::Module;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys_are_underscore_prefixed() {
        assert!(is_reserved_key(METADATA_KEY));
        assert!(is_reserved_key(MODULES_USED_KEY));
        assert!(is_reserved_key("_anything"));
        assert!(!is_reserved_key("full_name"));
        assert!(!is_reserved_key(""));
    }
}
