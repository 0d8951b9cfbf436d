//! Patient-field classification for case exports.
//!
//! Cases store all patient fields in one open `field_data` mapping. This
//! crate turns that mapping into named module buckets:
//!
//! - **Structured v2 records** (`_metadata.data_structure_version == "2.0"`)
//!   arrive pre-grouped: each top-level object value is a module bucket,
//!   taken verbatim.
//! - **Legacy records** are flat: each field key is matched against fixed
//!   keyword groups in priority order, gated on the buckets the record
//!   declares in `_modules_used`, with `basic_information` as the guaranteed
//!   fallback.
//!
//! Classification never fails and never drops a field; see
//! [`engine::classify`]. [`summary`] builds the four-field display summary
//! the case list shows per patient.

#![deny(unsafe_code)]

pub mod engine;
pub mod keywords;
pub mod summary;

pub use engine::{Classification, classify};
pub use keywords::{KEYWORD_GROUPS, KeywordGroup, first_matching_module};
pub use summary::{
    NOT_SPECIFIED, PatientSummary, UNKNOWN, UNKNOWN_PATIENT, summarize, summarize_case,
    summarize_classified,
};
