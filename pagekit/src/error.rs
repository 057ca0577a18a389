use thiserror::Error;

/// Errors raised while configuring or initializing a page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Document(#[from] webdom::DocumentError),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("invalid mask `{pattern}`: {reason}")]
    Mask { pattern: String, reason: String },
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}
