//! Storage trait for patient cases plus an in-memory implementation.

use std::collections::BTreeMap;

use casebook_model::{CasePatch, PatientCase};

use crate::error::{Result, StoreError};

/// Persistence seam for patient cases.
///
/// Implementations must treat case ids as opaque, unique keys and must never
/// reorder or rewrite `field_data` beyond what a [`CasePatch`] asks for.
pub trait CaseStore {
    /// All stored cases, newest first (ties broken by id).
    fn list(&self) -> Result<Vec<PatientCase>>;

    /// The case with the given id, or [`StoreError::NotFound`].
    fn get(&self, id: &str) -> Result<PatientCase>;

    /// Store a new case; fails with [`StoreError::AlreadyExists`] on id clash.
    fn create(&mut self, case: PatientCase) -> Result<()>;

    /// Apply a patch to an existing case and return the updated record.
    fn update(&mut self, id: &str, patch: &CasePatch) -> Result<PatientCase>;

    /// Remove a case; fails with [`StoreError::NotFound`] if absent.
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// Sort cases newest first, ties broken by ascending id.
///
/// Shared by store implementations so `list` order never depends on the
/// backing medium.
pub(crate) fn sort_for_listing(cases: &mut [PatientCase]) {
    cases.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// In-memory case store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cases: BTreeMap<String, PatientCase>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the store holds no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl CaseStore for MemoryStore {
    fn list(&self) -> Result<Vec<PatientCase>> {
        let mut cases: Vec<PatientCase> = self.cases.values().cloned().collect();
        sort_for_listing(&mut cases);
        Ok(cases)
    }

    fn get(&self, id: &str) -> Result<PatientCase> {
        self.cases
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn create(&mut self, case: PatientCase) -> Result<()> {
        if self.cases.contains_key(&case.id) {
            return Err(StoreError::AlreadyExists {
                id: case.id.clone(),
            });
        }
        self.cases.insert(case.id.clone(), case);
        Ok(())
    }

    fn update(&mut self, id: &str, patch: &CasePatch) -> Result<PatientCase> {
        let case = self
            .cases
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        patch.apply(case);
        Ok(case.clone())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.cases
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }
}
