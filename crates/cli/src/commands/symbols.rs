//! Lists the configured default symbol universe.

use anyhow::{Context, Result};
use clap::Args;
use option_scan_core::ConfigLoader;

/// Arguments for the symbols command.
#[derive(Args, Debug, Clone)]
pub struct SymbolsArgs {
    /// Config file path
    #[arg(short, long, default_value = option_scan_core::config_loader::DEFAULT_CONFIG_PATH)]
    pub config: String,
}

/// Prints the default universe, one symbol per line.
///
/// # Errors
/// Returns an error if the config file cannot be parsed.
pub fn run_symbols(args: SymbolsArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config))?;

    for symbol in &config.scan.symbols {
        println!("{symbol}");
    }
    Ok(())
}
