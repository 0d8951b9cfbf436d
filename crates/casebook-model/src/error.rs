use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown case status: {0}")]
    UnknownStatus(String),
    #[error("unknown module name: {0}")]
    UnknownModule(String),
    #[error("invalid case record: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
