//! Case and settings persistence for the casebook tools.
//!
//! Two storage seams live here:
//!
//! - [`CaseStore`]: CRUD over [`casebook_model::PatientCase`] records, with
//!   a directory-of-JSON-files implementation ([`JsonDirStore`]) and an
//!   in-memory one ([`MemoryStore`]) for tests and embedding.
//! - [`KeyValueStore`]: flat string settings, with [`JsonFileKv`] and
//!   [`MemoryKv`].
//!
//! All file writes are atomic (temp file + rename) so a crash mid-save never
//! corrupts an existing record.

#![deny(unsafe_code)]

pub mod case_store;
pub mod error;
mod io;
pub mod json_dir;
pub mod kv;

pub use case_store::{CaseStore, MemoryStore};
pub use error::{Result, StoreError};
pub use json_dir::JsonDirStore;
pub use kv::{JsonFileKv, KeyValueStore, MemoryKv};
