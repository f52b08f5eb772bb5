use crate::types::OptionContract;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Source of quotes, earnings dates, and option chains.
///
/// Each lookup may fail independently; the scanner treats every `Err` and
/// every `Ok(None)` as an absent value.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Whether an API credential is configured. Checked once before a scan.
    fn has_credentials(&self) -> bool;

    async fn previous_close(&self, symbol: &str) -> Result<Option<Decimal>>;

    async fn daily_close(&self, symbol: &str) -> Result<Option<Decimal>>;

    /// Next reported earnings date, as the provider formats it.
    async fn next_earnings_date(&self, symbol: &str) -> Result<Option<String>>;

    async fn option_chain(&self, symbol: &str, query_date: NaiveDate)
        -> Result<Vec<OptionContract>>;
}
