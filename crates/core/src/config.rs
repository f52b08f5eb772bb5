use serde::{Deserialize, Serialize};

use crate::earnings::DEFAULT_EARNINGS_WINDOW_DAYS;
use crate::types::OptionType;

/// Symbols offered when none are given on the command line.
pub const DEFAULT_SYMBOLS: [&str; 16] = [
    "HOOD", "IREN", "SOFI", "CELH", "AFRM", "PLTR", "AMD", "CHWY", "HIMS", "IBIT", "BULL", "RDDT",
    "SBUX", "RKLB", "UBER", "AMZN",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub alpha_vantage: AlphaVantageSettings,
    pub scan: ScanDefaults,
}

/// Provider endpoint settings. The API key is injected separately and never
/// read from config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaVantageSettings {
    pub base_url: String,
    /// Data entitlement sent with quote and option-chain queries.
    pub entitlement: String,
    /// Earnings calendar horizon (`3month`, `6month` or `12month`).
    pub earnings_horizon: String,
    pub quote_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for AlphaVantageSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.alphavantage.co".to_string(),
            entitlement: "delayed".to_string(),
            earnings_horizon: "3month".to_string(),
            quote_timeout_secs: 15,
            request_timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanDefaults {
    pub symbols: Vec<String>,
    pub delta_target: f64,
    pub option_type: OptionType,
    pub earnings_window_days: u64,
}

impl Default for ScanDefaults {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect(),
            delta_target: -0.20,
            option_type: OptionType::Put,
            earnings_window_days: DEFAULT_EARNINGS_WINDOW_DAYS,
        }
    }
}
