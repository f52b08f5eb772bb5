use clap::{Parser, Subcommand};

mod commands;

use commands::{ScanArgs, SymbolsArgs};

#[derive(Parser)]
#[command(name = "option-scan")]
#[command(about = "Find the option contract nearest a delta target for each symbol", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan option chains and total premium and collateral
    Scan(ScanArgs),
    /// List the default symbol universe
    Symbols(SymbolsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON/CSV on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan(args) => {
            commands::run_scan(args).await?;
        }
        Commands::Symbols(args) => {
            commands::run_symbols(args)?;
        }
    }

    Ok(())
}
