//! Alpha Vantage integration for the option scanner.
//!
//! This crate provides:
//! - REST client for the quote, daily series, historical options, and
//!   earnings calendar endpoints
//! - Lenient decoding of Alpha Vantage's string-typed payloads
//! - A [`option_scan_core::MarketDataProvider`] implementation
//!
//! # Authentication
//!
//! Alpha Vantage authenticates with an `apikey` query parameter. The key is
//! passed in explicitly through [`AlphaVantageClientConfig`]; by convention
//! callers read it from `ALPHA_VANTAGE_API_KEY`.
//!
//! # API Endpoints
//!
//! - `GET /query?function=GLOBAL_QUOTE` - Latest price (15 minute delayed)
//! - `GET /query?function=TIME_SERIES_DAILY` - Daily bars
//! - `GET /query?function=HISTORICAL_OPTIONS` - Option chain for a date
//! - `GET /query?function=EARNINGS_CALENDAR` - Upcoming earnings (CSV)

pub mod client;
pub mod error;
mod models;
mod provider;

pub use client::{AlphaVantageClient, AlphaVantageClientConfig, ALPHA_VANTAGE_URL, API_KEY_ENV};
pub use error::{AlphaVantageError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_exports() {
        let config = AlphaVantageClientConfig::new("key");
        assert!(AlphaVantageClient::new(config).is_ok());
    }

    #[test]
    fn test_constants_accessible() {
        assert!(ALPHA_VANTAGE_URL.starts_with("https://"));
        assert_eq!(API_KEY_ENV, "ALPHA_VANTAGE_API_KEY");
    }
}
