use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocstoreError>;

#[derive(Debug, Error)]
pub enum DocstoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for DocstoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DocstoreError::Parse(err.to_string())
        } else {
            DocstoreError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DocstoreError {
    fn from(err: serde_json::Error) -> Self {
        DocstoreError::Parse(err.to_string())
    }
}
