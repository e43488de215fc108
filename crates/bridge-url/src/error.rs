// File: src/error.rs
// Purpose: Errors raised while encoding bridge URLs

use bridge_uri::UriError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The target could not be parsed or matched no encoding rule
    #[error("Malformed target: {0}")]
    MalformedTarget(String),

    /// The configured character set cannot be used for percent-encoding
    #[error("Unsupported character set: {0}")]
    UnsupportedCharset(String),
}

impl From<UriError> for BridgeError {
    fn from(err: UriError) -> Self {
        BridgeError::MalformedTarget(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
