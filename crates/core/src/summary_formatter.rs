#![allow(clippy::format_push_string)]

use rust_decimal::Decimal;

use crate::types::{ResultRow, ScanSummary};

const RULE: &str =
    "═══════════════════════════════════════════════════════════════════════════════════════════════════════════\n";
const THIN_RULE: &str =
    "───────────────────────────────────────────────────────────────────────────────────────────────────────────\n";

pub struct SummaryFormatter;

impl SummaryFormatter {
    #[must_use]
    pub fn format(summary: &ScanSummary) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        output.push_str("                                            OPTION SCAN\n");
        output.push_str(RULE);
        output.push_str(&format!(
            "{:<8} {:>9} {:>8} {:>11} {:>11} {:>11} {:>8} {:>10} {:>12} {:>11}\n",
            "Symbol",
            "Strike",
            "Mid",
            "PrevClose",
            "DailyClose",
            "Expiration",
            "Delta",
            "Premium",
            "Collateral",
            "Earnings",
        ));
        output.push_str(THIN_RULE);

        for row in &summary.rows {
            output.push_str(&Self::format_row(row));
        }

        output.push_str(THIN_RULE);
        output.push_str(&format!(
            "Matched:               {} of {}\n",
            summary.matched_count(),
            summary.rows.len()
        ));
        output.push_str(&format!(
            "Total Premium:         ${:.2}\n",
            summary.total_premium
        ));
        output.push_str(&format!(
            "Total Collateral:      ${:.2}\n",
            summary.total_collateral
        ));
        output.push_str(RULE);

        if summary.matched_count() == 0 && !summary.rows.is_empty() {
            output.push_str("\n⚠️  No contract matched the filter for any symbol.\n");
            output.push_str("    Check the expiration date and delta target.\n\n");
        }

        output
    }

    fn format_row(row: &ResultRow) -> String {
        let earnings = match (&row.earnings_date, row.is_upcoming_earnings) {
            (Some(date), true) => format!("{date}*"),
            (Some(date), false) => date.clone(),
            (None, _) => String::new(),
        };

        format!(
            "{:<8} {:>9.2} {:>8.2} {:>11} {:>11} {:>11} {:>8} {:>10.2} {:>12.2} {:>11}\n",
            row.symbol,
            row.strike,
            row.mid_price,
            Self::optional_price(row.prev_close),
            Self::optional_price(row.daily_close),
            row.expiration,
            row.delta.map(|d| format!("{d:.4}")).unwrap_or_default(),
            row.premium,
            row.collateral,
            earnings,
        )
    }

    fn optional_price(value: Option<Decimal>) -> String {
        value.map(|v| format!("{v:.2}")).unwrap_or_default()
    }
}
