//! Domain types shared by the scanner and data providers.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Option contract type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Lowercase wire name, as used by the provider and the CLI.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(Self::Call),
            "put" => Ok(Self::Put),
            other => Err(ScanError::invalid_request(format!(
                "unknown option type: {other:?} (expected \"put\" or \"call\")"
            ))),
        }
    }
}

/// A single option contract from a provider's chain.
///
/// `expiration` is kept exactly as the provider sent it; filtering compares it
/// as a string against the requested `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub expiration: String,
    pub option_type: OptionType,
    pub delta: Option<f64>,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub strike: Decimal,
}

/// Inputs for one scan invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub symbols: Vec<String>,
    pub query_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub delta_target: f64,
    pub option_type: OptionType,
}

impl ScanRequest {
    /// Checks the request before any lookup runs.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidRequest`] for an empty symbol list, a blank
    /// symbol, or a non-finite delta target.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.symbols.is_empty() {
            return Err(ScanError::invalid_request("at least one symbol is required"));
        }
        if let Some(pos) = self.symbols.iter().position(|s| s.trim().is_empty()) {
            return Err(ScanError::invalid_request(format!(
                "symbol at position {pos} is blank"
            )));
        }
        if !self.delta_target.is_finite() {
            return Err(ScanError::invalid_request(format!(
                "delta target must be finite, got {}",
                self.delta_target
            )));
        }
        Ok(())
    }

    /// Whether the delta target's sign matches the option type
    /// (puts carry negative deltas, calls positive).
    #[must_use]
    pub fn delta_sign_matches(&self) -> bool {
        match self.option_type {
            OptionType::Put => self.delta_target <= 0.0,
            OptionType::Call => self.delta_target >= 0.0,
        }
    }

    /// Expiration formatted the way providers send it.
    #[must_use]
    pub fn expiration_key(&self) -> String {
        self.expiration_date.format("%Y-%m-%d").to_string()
    }
}

/// Quote and calendar context for a symbol. Every field is optional because
/// each lookup fails independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteContext {
    pub prev_close: Option<Decimal>,
    pub daily_close: Option<Decimal>,
    pub earnings_date: Option<String>,
}

/// One output row per requested symbol.
///
/// Contract-derived fields hold zero/empty sentinels when no contract was
/// selected (`strike == 0`, `expiration == ""`, `delta == None`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub symbol: String,
    pub strike: Decimal,
    pub mid_price: Decimal,
    pub prev_close: Option<Decimal>,
    pub daily_close: Option<Decimal>,
    pub expiration: String,
    pub delta: Option<f64>,
    pub premium: Decimal,
    pub collateral: Decimal,
    pub earnings_date: Option<String>,
    pub is_upcoming_earnings: bool,
}

impl ResultRow {
    /// Row with quote context but no selected contract.
    #[must_use]
    pub fn unmatched(symbol: impl Into<String>, quote: QuoteContext, upcoming: bool) -> Self {
        Self {
            symbol: symbol.into(),
            strike: Decimal::ZERO,
            mid_price: Decimal::ZERO,
            prev_close: quote.prev_close,
            daily_close: quote.daily_close,
            expiration: String::new(),
            delta: None,
            premium: Decimal::ZERO,
            collateral: Decimal::ZERO,
            earnings_date: quote.earnings_date,
            is_upcoming_earnings: upcoming,
        }
    }

    /// True when a contract was selected for this symbol.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.delta.is_some()
    }
}

/// Rows plus portfolio totals for one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub rows: Vec<ResultRow>,
    pub total_premium: Decimal,
    pub total_collateral: Decimal,
}

impl ScanSummary {
    /// Builds the summary, computing totals from the rows.
    #[must_use]
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        let total_premium = crate::pricing::total_premium(&rows);
        let total_collateral = crate::pricing::total_collateral(&rows);
        Self {
            rows,
            total_premium,
            total_collateral,
        }
    }

    /// Number of rows with a selected contract.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_matched()).count()
    }
}
