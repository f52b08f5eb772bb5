//! Alpha Vantage REST client.
//!
//! One GET per lookup against the `/query` endpoint, with a per-request
//! timeout. No retries and no caching.
//!
//! # Example
//!
//! ```ignore
//! use option_scan_alphavantage::{AlphaVantageClient, AlphaVantageClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AlphaVantageClient::new(AlphaVantageClientConfig::new("demo"))?;
//!     let price = client.global_quote_price("IBM").await?;
//!     println!("IBM: {:?}", price);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use chrono::NaiveDate;
use option_scan_core::{AlphaVantageSettings, OptionContract};
use reqwest::Client;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AlphaVantageError, Result};
use crate::models::{
    check_error_document, earliest_report_date, RawDailySeriesResponse, RawGlobalQuoteResponse,
    RawOptionsResponse,
};

// =============================================================================
// Constants
// =============================================================================

/// Alpha Vantage API base URL.
pub const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co";

/// Environment variable conventionally holding the API key.
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

const MAX_SYMBOL_LEN: usize = 16;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the Alpha Vantage client.
#[derive(Debug)]
pub struct AlphaVantageClientConfig {
    /// Base URL for the API (without `/query`).
    pub base_url: String,

    /// API key. Redacted in `Debug` output.
    pub api_key: SecretString,

    /// Entitlement sent with quote and option-chain requests.
    pub entitlement: String,

    /// Earnings calendar horizon.
    pub earnings_horizon: String,

    /// Timeout for `GLOBAL_QUOTE` requests, in seconds.
    pub quote_timeout_secs: u64,

    /// Timeout for every other request, in seconds.
    pub request_timeout_secs: u64,
}

impl AlphaVantageClientConfig {
    /// Creates a configuration with default endpoint settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_settings(&AlphaVantageSettings::default(), SecretString::from(api_key.into()))
    }

    /// Creates a configuration from loaded settings and an injected key.
    #[must_use]
    pub fn from_settings(settings: &AlphaVantageSettings, api_key: SecretString) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key,
            entitlement: settings.entitlement.clone(),
            earnings_horizon: settings.earnings_horizon.clone(),
            quote_timeout_secs: settings.quote_timeout_secs,
            request_timeout_secs: settings.request_timeout_secs,
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets both request timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, quote_secs: u64, request_secs: u64) -> Self {
        self.quote_timeout_secs = quote_secs;
        self.request_timeout_secs = request_secs;
        self
    }
}

// =============================================================================
// AlphaVantageClient
// =============================================================================

/// Alpha Vantage REST client.
pub struct AlphaVantageClient {
    config: AlphaVantageClientConfig,
    http: Client,
}

impl std::fmt::Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("base_url", &self.config.base_url)
            .field("entitlement", &self.config.entitlement)
            .finish_non_exhaustive()
    }
}

impl AlphaVantageClient {
    /// Creates a new client with the given configuration.
    ///
    /// An empty API key is accepted here; the scanner rejects it before the
    /// first request via [`AlphaVantageClient::has_api_key`].
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: AlphaVantageClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("option-scan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AlphaVantageError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { config, http })
    }

    /// True when a non-blank API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.config.api_key.expose_secret().trim().is_empty()
    }

    /// Validates a symbol before it is placed in a query string.
    ///
    /// Accepts ASCII alphanumerics, `.` and `-` (e.g. "AMD", "BRK.B").
    fn validate_symbol(symbol: &str) -> Result<&str> {
        if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LEN {
            return Err(AlphaVantageError::invalid_symbol(symbol));
        }
        if !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(AlphaVantageError::invalid_symbol(symbol));
        }
        Ok(symbol)
    }

    /// Sends a `/query` GET and returns the body text.
    async fn query(
        &self,
        function: &str,
        params: &[(&str, &str)],
        timeout_secs: u64,
    ) -> Result<String> {
        let url = format!("{}/query", self.config.base_url.trim_end_matches('/'));

        tracing::debug!(function, ?params, timeout_secs, "GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("function", function)])
            .query(params)
            .query(&[("apikey", self.config.api_key.expose_secret())])
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AlphaVantageError::api(status.as_u16(), text));
        }

        Ok(response.text().await?)
    }

    /// Sends a query and decodes a JSON body, rejecting error documents.
    async fn query_json<T: DeserializeOwned>(
        &self,
        function: &str,
        params: &[(&str, &str)],
        timeout_secs: u64,
    ) -> Result<T> {
        let body = self.query(function, params, timeout_secs).await?;
        let value: Value = serde_json::from_str(&body)?;
        check_error_document(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Latest quoted price from `GLOBAL_QUOTE` (`05. price`).
    ///
    /// # Errors
    /// Returns error on network, HTTP, or decoding failure.
    pub async fn global_quote_price(&self, symbol: &str) -> Result<Option<Decimal>> {
        let symbol = Self::validate_symbol(symbol)?;
        let raw: RawGlobalQuoteResponse = self
            .query_json(
                "GLOBAL_QUOTE",
                &[("symbol", symbol), ("entitlement", self.config.entitlement.as_str())],
                self.config.quote_timeout_secs,
            )
            .await?;
        Ok(raw.price())
    }

    /// Close of the latest trading day from `TIME_SERIES_DAILY`.
    ///
    /// # Errors
    /// Returns error on network, HTTP, or decoding failure.
    pub async fn latest_daily_close(&self, symbol: &str) -> Result<Option<Decimal>> {
        let symbol = Self::validate_symbol(symbol)?;
        let raw: RawDailySeriesResponse = self
            .query_json(
                "TIME_SERIES_DAILY",
                &[("symbol", symbol), ("outputsize", "compact")],
                self.config.request_timeout_secs,
            )
            .await?;
        Ok(raw.latest_close())
    }

    /// Option chain as of `date` from `HISTORICAL_OPTIONS`.
    ///
    /// # Errors
    /// Returns error on network, HTTP, or decoding failure.
    pub async fn historical_options(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Vec<OptionContract>> {
        let symbol = Self::validate_symbol(symbol)?;
        let date = date.format("%Y-%m-%d").to_string();
        let raw: RawOptionsResponse = self
            .query_json(
                "HISTORICAL_OPTIONS",
                &[
                    ("symbol", symbol),
                    ("date", date.as_str()),
                    ("entitlement", self.config.entitlement.as_str()),
                ],
                self.config.request_timeout_secs,
            )
            .await?;
        let contracts = raw.into_contracts();
        tracing::debug!(symbol, date = %date, contracts = contracts.len(), "Fetched option chain");
        Ok(contracts)
    }

    /// Next report date from `EARNINGS_CALENDAR`.
    ///
    /// The calendar is CSV; a JSON body is an error document.
    ///
    /// # Errors
    /// Returns error on network, HTTP, or decoding failure.
    pub async fn next_earnings_date(&self, symbol: &str) -> Result<Option<String>> {
        let symbol = Self::validate_symbol(symbol)?;
        let body = self
            .query(
                "EARNINGS_CALENDAR",
                &[("symbol", symbol), ("horizon", self.config.earnings_horizon.as_str())],
                self.config.request_timeout_secs,
            )
            .await?;

        if body.trim_start().starts_with('{') {
            let value: Value = serde_json::from_str(&body)?;
            check_error_document(&value)?;
            return Err(AlphaVantageError::Serialization(
                "expected CSV earnings calendar, got JSON".to_string(),
            ));
        }

        earliest_report_date(&body)
    }
}
