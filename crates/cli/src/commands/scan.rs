//! Option scan CLI command.
//!
//! Builds a scan request from arguments and config defaults, runs it against
//! Alpha Vantage, and prints one row per symbol with portfolio totals.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use option_scan_alphavantage::{AlphaVantageClient, AlphaVantageClientConfig, API_KEY_ENV};
use option_scan_core::{
    AppConfig, ConfigLoader, OptionScanner, OptionType, ScanError, ScanRequest, ScanSummary,
    SummaryFormatter,
};
use secrecy::SecretString;

/// Output format for scan results.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table with totals
    #[default]
    Table,
    /// Full summary as pretty-printed JSON
    Json,
    /// One CSV record per symbol
    Csv,
}

/// Arguments for the scan command.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Comma-separated symbols (e.g., "AMD,HOOD"). Defaults to the configured universe.
    #[arg(long)]
    pub symbols: Option<String>,

    /// Date of the option chain snapshot (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub query_date: Option<NaiveDate>,

    /// Contract expiration to match (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub expiration_date: NaiveDate,

    /// Delta upper bound; puts use negative values (e.g., -0.20)
    #[arg(long, allow_hyphen_values = true)]
    pub delta_target: Option<f64>,

    /// Option type to scan: put or call
    #[arg(long, value_parser = parse_option_type)]
    pub option_type: Option<OptionType>,

    /// Alpha Vantage API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = option_scan_core::config_loader::DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {s:?}: {e}"))
}

fn parse_option_type(s: &str) -> Result<OptionType, String> {
    s.parse::<OptionType>().map_err(|e| e.to_string())
}

/// Splits a comma-separated symbol list, trimming and upper-casing each entry.
fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Merges arguments over config defaults.
fn build_request(args: &ScanArgs, config: &AppConfig, today: NaiveDate) -> ScanRequest {
    let symbols = match &args.symbols {
        Some(raw) => parse_symbols(raw),
        None => config.scan.symbols.clone(),
    };

    ScanRequest {
        symbols,
        query_date: args.query_date.unwrap_or(today),
        expiration_date: args.expiration_date,
        delta_target: args.delta_target.unwrap_or(config.scan.delta_target),
        option_type: args.option_type.unwrap_or(config.scan.option_type),
    }
}

/// Runs the scan command.
///
/// # Errors
/// Returns an error if config loading fails, the API key is missing, or the
/// request is invalid. Individual lookup failures only blank their fields.
pub async fn run_scan(args: ScanArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config))?;

    let request = build_request(&args, &config, Local::now().date_naive());

    let api_key = SecretString::from(args.api_key.clone().unwrap_or_default());
    let client = AlphaVantageClient::new(AlphaVantageClientConfig::from_settings(
        &config.alpha_vantage,
        api_key,
    ))?;
    let scanner = OptionScanner::new(client)
        .with_earnings_window_days(config.scan.earnings_window_days);

    let summary = match scanner.scan(&request).await {
        Ok(summary) => summary,
        Err(e @ ScanError::MissingCredential(_)) => {
            return Err(anyhow::Error::new(e).context(format!(
                "scan aborted: set {API_KEY_ENV} or pass --api-key"
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = std::io::stdout();
    write_summary(&summary, args.format, stdout.lock())
}

fn write_summary(summary: &ScanSummary, format: OutputFormat, mut out: impl Write) -> Result<()> {
    match format {
        OutputFormat::Table => {
            out.write_all(SummaryFormatter::format(summary).as_bytes())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, summary)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in &summary.rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
