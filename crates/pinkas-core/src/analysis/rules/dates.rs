//! Transaction date extraction.
//!
//! Day-first convention throughout. The first structurally valid match from
//! the ordered cascade wins; an impossible date (month 13, day 32) is skipped
//! rather than fatal. With no match at all the date defaults to "today" in
//! the canonical time zone.

use chrono::{NaiveDate, Utc};

use super::patterns::DATE_PATTERNS;
use crate::analysis::config::AnalyzerConfig;
use crate::analysis::trace::AnalysisTrace;

/// Extract the transaction date, defaulting to now in the configured zone.
pub fn extract_transaction_date(
    text: &str,
    config: &AnalyzerConfig,
    trace: &mut AnalysisTrace,
) -> NaiveDate {
    for pattern in DATE_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let year = expand_year(caps[3].parse().unwrap_or(0), config.two_digit_year_pivot);

            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                trace.record("transaction_date", pattern.name, date.to_string());
                return date;
            }
        }
    }

    let today = Utc::now().with_timezone(&config.timezone).date_naive();
    trace.record("transaction_date", "default", today.to_string());
    today
}

/// Two-digit years above the pivot expand to 19xx, at or below it to 20xx.
fn expand_year(year: i32, pivot: i32) -> i32 {
    if year < 100 {
        if year > pivot {
            1900 + year
        } else {
            2000 + year
        }
    } else {
        year
    }
}
