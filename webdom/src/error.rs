use thiserror::Error;

/// Errors raised while building or querying a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
    #[error("fixture parse error: {0}")]
    Fixture(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
