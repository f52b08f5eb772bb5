//! [`MarketDataProvider`] implementation backed by Alpha Vantage.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use option_scan_core::{MarketDataProvider, OptionContract};
use rust_decimal::Decimal;

use crate::client::AlphaVantageClient;

#[async_trait]
impl MarketDataProvider for AlphaVantageClient {
    fn has_credentials(&self) -> bool {
        self.has_api_key()
    }

    async fn previous_close(&self, symbol: &str) -> Result<Option<Decimal>> {
        Ok(self.global_quote_price(symbol).await?)
    }

    async fn daily_close(&self, symbol: &str) -> Result<Option<Decimal>> {
        Ok(self.latest_daily_close(symbol).await?)
    }

    async fn next_earnings_date(&self, symbol: &str) -> Result<Option<String>> {
        Ok(AlphaVantageClient::next_earnings_date(self, symbol).await?)
    }

    async fn option_chain(
        &self,
        symbol: &str,
        query_date: NaiveDate,
    ) -> Result<Vec<OptionContract>> {
        Ok(self.historical_options(symbol, query_date).await?)
    }
}
