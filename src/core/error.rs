use thiserror::Error;

/// Errors raised while parsing user-supplied menu settings (CLI flags, config files).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("unknown transform kind: {0}")]
    UnknownTransform(String),
    #[error("invalid key pattern '{pattern}': {reason}")]
    InvalidKeyPattern { pattern: String, reason: String },
}
