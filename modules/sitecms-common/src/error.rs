use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteCmsError {
    #[error("Unknown document kind: {0}")]
    UnknownKind(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
