//! Directory-backed case store: one JSON file per case.

use std::fs;
use std::path::{Path, PathBuf};

use casebook_model::{CasePatch, PatientCase};

use crate::case_store::{CaseStore, sort_for_listing};
use crate::error::{Result, StoreError};
use crate::io::write_atomic;

/// File extension for stored case records.
const CASE_EXTENSION: &str = "json";

/// Case store that keeps each case as `<id>.json` under a root directory.
///
/// Writes are atomic (temp file + rename) to prevent data corruption on
/// crash or power loss. File names double as case ids, so ids are restricted
/// to characters that are safe in a file name.
#[derive(Debug)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io("create directory", &root, e))?;
        Ok(Self { root })
    }

    /// Directory holding the case files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the file path for a case id, rejecting ids that would
    /// escape the root or hide the file.
    fn case_path(&self, id: &str) -> Result<PathBuf> {
        if !is_valid_id(id) {
            return Err(StoreError::InvalidId { id: id.to_string() });
        }
        Ok(self.root.join(format!("{id}.{CASE_EXTENSION}")))
    }

    fn read_case(&self, path: &Path) -> Result<PatientCase> {
        let bytes =
            fs::read(path).map_err(|e| StoreError::io("read", path.to_path_buf(), e))?;
        let case: PatientCase =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::InvalidCase {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // The file name is the lookup key; a divergent embedded id means the
        // file was renamed or hand-edited.
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        if stem != case.id {
            return Err(StoreError::InvalidCase {
                path: path.to_path_buf(),
                reason: format!("file is named {stem:?} but record id is {:?}", case.id),
            });
        }
        Ok(case)
    }

    fn write_case(&self, case: &PatientCase) -> Result<()> {
        let path = self.case_path(&case.id)?;
        let bytes =
            serde_json::to_vec_pretty(case).map_err(|e| StoreError::Serialization { source: e })?;
        write_atomic(&path, &bytes)?;
        tracing::info!("Saved case {} to {}", case.id, path.display());
        Ok(())
    }
}

impl CaseStore for JsonDirStore {
    fn list(&self) -> Result<Vec<PatientCase>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| StoreError::io("read directory", &self.root, e))?;

        let mut cases = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| StoreError::io("read directory", &self.root, e))?;
            let path = entry.path();
            // Leftover temp files have a .tmp extension and are skipped, as
            // is anything that is not a plain file.
            if path.extension().and_then(|e| e.to_str()) != Some(CASE_EXTENSION)
                || !path.is_file()
            {
                continue;
            }
            cases.push(self.read_case(&path)?);
        }
        sort_for_listing(&mut cases);
        Ok(cases)
    }

    fn get(&self, id: &str) -> Result<PatientCase> {
        let path = self.case_path(id)?;
        if !path.exists() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        self.read_case(&path)
    }

    fn create(&mut self, case: PatientCase) -> Result<()> {
        let path = self.case_path(&case.id)?;
        if path.exists() {
            return Err(StoreError::AlreadyExists {
                id: case.id.clone(),
            });
        }
        self.write_case(&case)
    }

    fn update(&mut self, id: &str, patch: &CasePatch) -> Result<PatientCase> {
        let mut case = self.get(id)?;
        patch.apply(&mut case);
        self.write_case(&case)?;
        Ok(case)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let path = self.case_path(id)?;
        if !path.exists() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        fs::remove_file(&path).map_err(|e| StoreError::io("remove", path.clone(), e))?;
        tracing::info!("Deleted case {} from {}", id, path.display());
        Ok(())
    }
}

/// Whether an id is usable as a file stem.
///
/// Ids are restricted to ASCII alphanumerics plus `-`, `_`, and `.`, and must
/// not start with a dot. This keeps every id inside the root directory and
/// visible to a plain directory listing.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
