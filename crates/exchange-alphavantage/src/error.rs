//! Error types for the Alpha Vantage integration.
//!
//! Every variant is recoverable from the scanner's point of view: a failed
//! lookup leaves one field or row empty and the scan continues.

use thiserror::Error;

/// Errors that can occur when talking to Alpha Vantage.
#[derive(Debug, Error)]
pub enum AlphaVantageError {
    /// Client could not be constructed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Non-success HTTP status, or an error document in a 200 response.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the API.
        message: String,
    },

    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// Request timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Payload could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Symbol is not safe to put in a query string.
    #[error("invalid symbol: {0:?}")]
    InvalidSymbol(String),
}

impl AlphaVantageError {
    /// Creates an API error from status code and message.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates an invalid symbol error.
    pub fn invalid_symbol(symbol: impl Into<String>) -> Self {
        Self::InvalidSymbol(symbol.into())
    }
}

impl From<reqwest::Error> for AlphaVantageError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key as a query parameter.
        let err = err.without_url();
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AlphaVantageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<csv::Error> for AlphaVantageError {
    fn from(err: csv::Error) -> Self {
        Self::Serialization(format!("csv: {err}"))
    }
}

/// Result type alias for Alpha Vantage operations.
pub type Result<T> = std::result::Result<T, AlphaVantageError>;
