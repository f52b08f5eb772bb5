//! Fatal scan errors.
//!
//! Lookup failures never surface here: the scanner degrades them to absent
//! fields. Only preconditions that make the whole scan meaningless do.

use thiserror::Error;

/// Errors that abort a scan before any lookup is made.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The data provider has no API credential.
    #[error("missing API credential: {0}")]
    MissingCredential(String),

    /// The request failed validation.
    #[error("invalid scan request: {0}")]
    InvalidRequest(String),
}

impl ScanError {
    /// Creates a missing-credential error.
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::MissingCredential(message.into())
    }

    /// Creates an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}
