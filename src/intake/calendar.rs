use chrono::{Datelike, NaiveDate};

/// 1-indexed week of the report date's calendar year.
///
/// Week 1 starts on January 1st regardless of weekday; days are counted from
/// that date and divided by seven, rounding down.
pub fn week_of_season(report_date: NaiveDate) -> u32 {
    report_date.ordinal0() / 7 + 1
}

/// Parse a `YYYY-MM-DD` report date.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
