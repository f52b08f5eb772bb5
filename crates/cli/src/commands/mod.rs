//! CLI commands for the option scanner.

pub mod scan;
pub mod symbols;

pub use scan::{run_scan, ScanArgs};
pub use symbols::{run_symbols, SymbolsArgs};
