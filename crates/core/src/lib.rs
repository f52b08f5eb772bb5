//! Option chain scanning: pick the contract nearest a delta target for each
//! symbol and total the premium and collateral across the portfolio.

pub mod config;
pub mod config_loader;
pub mod earnings;
pub mod error;
pub mod pricing;
pub mod scanner;
pub mod selection;
pub mod summary_formatter;
pub mod traits;
pub mod types;

pub use config::{AlphaVantageSettings, AppConfig, ScanDefaults, DEFAULT_SYMBOLS};
pub use config_loader::ConfigLoader;
pub use error::ScanError;
pub use scanner::OptionScanner;
pub use selection::{select_best, Candidate, ContractFilter};
pub use summary_formatter::SummaryFormatter;
pub use traits::MarketDataProvider;
pub use types::{OptionContract, OptionType, QuoteContext, ResultRow, ScanRequest, ScanSummary};
