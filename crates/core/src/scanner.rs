use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::earnings::{self, DEFAULT_EARNINGS_WINDOW_DAYS};
use crate::error::ScanError;
use crate::pricing;
use crate::selection::{self, Candidate, ContractFilter};
use crate::traits::MarketDataProvider;
use crate::types::{QuoteContext, ResultRow, ScanRequest, ScanSummary};

/// Runs the per-symbol fetch, filter, and select pipeline.
///
/// Symbols are processed one at a time in request order. Lookup failures
/// degrade single fields or rows; only credential and validation problems
/// abort the scan.
pub struct OptionScanner<P>
where
    P: MarketDataProvider,
{
    provider: P,
    earnings_window_days: u64,
}

impl<P> OptionScanner<P>
where
    P: MarketDataProvider,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            earnings_window_days: DEFAULT_EARNINGS_WINDOW_DAYS,
        }
    }

    #[must_use]
    pub fn with_earnings_window_days(mut self, days: u64) -> Self {
        self.earnings_window_days = days;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Scans using the local calendar date for the earnings window.
    ///
    /// # Errors
    /// See [`OptionScanner::scan_as_of`].
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanSummary, ScanError> {
        self.scan_as_of(request, Local::now().date_naive()).await
    }

    /// Scans with an explicit reference date for the earnings window.
    ///
    /// # Errors
    /// Returns [`ScanError::MissingCredential`] if the provider has no API key
    /// and [`ScanError::InvalidRequest`] if the request fails validation. Both
    /// are checked before any lookup.
    pub async fn scan_as_of(
        &self,
        request: &ScanRequest,
        today: NaiveDate,
    ) -> Result<ScanSummary, ScanError> {
        if !self.provider.has_credentials() {
            return Err(ScanError::missing_credential(
                "data provider API key is not configured",
            ));
        }
        request.validate()?;

        if !request.delta_sign_matches() {
            warn!(
                delta_target = request.delta_target,
                option_type = %request.option_type,
                "Delta target sign does not match option type"
            );
        }

        info!(
            symbols = request.symbols.len(),
            query_date = %request.query_date,
            expiration = %request.expiration_date,
            delta_target = request.delta_target,
            option_type = %request.option_type,
            "Starting option scan"
        );

        let filter = ContractFilter::from_request(request);
        let mut rows = Vec::with_capacity(request.symbols.len());
        for symbol in &request.symbols {
            rows.push(self.scan_symbol(symbol, request, &filter, today).await);
        }

        let summary = ScanSummary::from_rows(rows);
        info!(
            rows = summary.rows.len(),
            matched = summary.matched_count(),
            total_premium = %summary.total_premium,
            total_collateral = %summary.total_collateral,
            "Option scan complete"
        );
        Ok(summary)
    }

    async fn scan_symbol(
        &self,
        symbol: &str,
        request: &ScanRequest,
        filter: &ContractFilter,
        today: NaiveDate,
    ) -> ResultRow {
        let quote = self.quote_context(symbol).await;
        let upcoming = earnings::is_upcoming(
            quote.earnings_date.as_deref(),
            today,
            self.earnings_window_days,
        );

        let contracts = match self.provider.option_chain(symbol, request.query_date).await {
            Ok(contracts) => contracts,
            Err(e) => {
                warn!(symbol, error = %e, "Option chain lookup failed");
                return ResultRow::unmatched(symbol, quote, upcoming);
            }
        };

        let Some(Candidate {
            contract: best,
            delta,
            bid,
            ask,
        }) = selection::select_best(&contracts, filter)
        else {
            debug!(symbol, contracts = contracts.len(), "No contract matched filter");
            return ResultRow::unmatched(symbol, quote, upcoming);
        };

        debug!(
            symbol,
            strike = %best.strike,
            delta,
            expiration = %best.expiration,
            "Selected contract"
        );

        ResultRow {
            symbol: symbol.to_string(),
            strike: best.strike,
            mid_price: pricing::mid_price(bid, ask),
            prev_close: quote.prev_close,
            daily_close: quote.daily_close,
            expiration: best.expiration.clone(),
            delta: Some(delta),
            premium: pricing::premium(bid, ask),
            collateral: pricing::collateral(best.strike),
            earnings_date: quote.earnings_date,
            is_upcoming_earnings: upcoming,
        }
    }

    /// Runs the three quote lookups, keeping whatever succeeds.
    async fn quote_context(&self, symbol: &str) -> QuoteContext {
        let prev_close = match self.provider.previous_close(symbol).await {
            Ok(v) => v,
            Err(e) => {
                warn!(symbol, error = %e, "Previous close lookup failed");
                None
            }
        };
        let daily_close = match self.provider.daily_close(symbol).await {
            Ok(v) => v,
            Err(e) => {
                warn!(symbol, error = %e, "Daily close lookup failed");
                None
            }
        };
        let earnings_date = match self.provider.next_earnings_date(symbol).await {
            Ok(v) => v,
            Err(e) => {
                warn!(symbol, error = %e, "Earnings lookup failed");
                None
            }
        };

        QuoteContext {
            prev_close,
            daily_close,
            earnings_date,
        }
    }
}
