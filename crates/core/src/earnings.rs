//! Upcoming-earnings window check.

use chrono::{Days, NaiveDate};

/// Default look-ahead for flagging an earnings date.
pub const DEFAULT_EARNINGS_WINDOW_DAYS: u64 = 30;

/// True when `earnings_date` parses as `YYYY-MM-DD` and falls within
/// `[today, today + window_days]`, both ends inclusive.
#[must_use]
pub fn is_upcoming(earnings_date: Option<&str>, today: NaiveDate, window_days: u64) -> bool {
    let Some(raw) = earnings_date else {
        return false;
    };
    let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") else {
        return false;
    };
    let Some(horizon) = today.checked_add_days(Days::new(window_days)) else {
        return false;
    };
    date >= today && date <= horizon
}
