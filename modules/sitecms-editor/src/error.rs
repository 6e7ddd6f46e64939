use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Document is still loading")]
    NotReady,

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("A reset is already in progress")]
    ResetInProgress,
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::Parse(err.to_string())
    }
}
