//! Shared file primitives for the directory-backed stores.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{Result, StoreError};

/// Write `bytes` to `path` atomically: temp file, sync, rename.
///
/// The temp file lives next to the target (`<name>.tmp`) so the rename never
/// crosses a filesystem boundary. A crash mid-write leaves the previous file
/// intact.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| StoreError::io("create directory", parent.to_path_buf(), e))?;
    }

    let temp_path = tmp_sibling(path);
    let mut file =
        File::create(&temp_path).map_err(|e| StoreError::io("create", temp_path.clone(), e))?;
    file.write_all(bytes)
        .map_err(|e| StoreError::io("write", temp_path.clone(), e))?;
    file.sync_all()
        .map_err(|e| StoreError::io("sync", temp_path.clone(), e))?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })
}

fn tmp_sibling(path: &Path) -> std::path::PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => path.with_extension(format!("{ext}.tmp")),
        None => path.with_extension("tmp"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_sibling_keeps_the_original_extension() {
        assert_eq!(
            tmp_sibling(Path::new("/data/case-1.json")),
            Path::new("/data/case-1.json.tmp")
        );
        assert_eq!(
            tmp_sibling(Path::new("/data/settings")),
            Path::new("/data/settings.tmp")
        );
    }
}
