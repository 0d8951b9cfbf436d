//! Error types for case storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading or writing stored cases.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("failed to {operation} {path}")]
    Io {
        /// Short verb describing the attempted operation ("read", "write", ...).
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A case file exists but its contents are not a valid case record.
    #[error("invalid case file {path}: {reason}")]
    InvalidCase {
        /// Path of the offending file.
        path: PathBuf,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// A settings file exists but its contents are not the expected shape.
    #[error("invalid settings file {path}: {reason}")]
    InvalidFormat {
        /// Path of the offending file.
        path: PathBuf,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Serializing a record for storage failed.
    #[error("failed to serialize record for storage")]
    Serialization {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The temp file was written but could not be renamed into place.
    #[error("failed to complete write to {target_path}")]
    AtomicWriteFailed {
        /// Temp file left behind by the failed rename.
        temp_path: PathBuf,
        /// Intended final path.
        target_path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No case with the requested id exists in the store.
    #[error("case not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A case with the same id already exists in the store.
    #[error("case already exists: {id}")]
    AlreadyExists {
        /// The conflicting id.
        id: String,
    },

    /// The case id cannot be used as a storage key.
    #[error("invalid case id: {id:?}")]
    InvalidId {
        /// The rejected id.
        id: String,
    },
}

/// Convenience alias used throughout the storage crate.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Build an [`StoreError::Io`] from an operation verb, path, and source.
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
