use thiserror::Error;

/// Errors produced while loading or saving session configuration.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backing settings store failed.
    #[error("settings store failure")]
    Store(#[from] casebook_store::StoreError),

    /// Serializing the configuration for storage failed.
    #[error("failed to serialize session configuration")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the session crate.
pub type Result<T> = std::result::Result<T, SessionError>;
