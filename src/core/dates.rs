//! Date normalization for outbound requests.
//!
//! EVDS only accepts `DD-MM-YYYY`. Callers may pass any of four shapes; the shape is
//! detected with a prefix match and the value is then parsed strictly.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::core::TcmbError;

/// Format sent on the wire.
pub const EVDS_DATE_FORMAT: &str = "%d-%m-%Y";

fn shapes() -> &'static [(Regex, &'static str); 4] {
    static SHAPES: OnceLock<[(Regex, &'static str); 4]> = OnceLock::new();
    SHAPES.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("static regex");
        [
            (re(r"^\d{1,2}-\d{1,2}-\d{4}"), "%d-%m-%Y"),
            (re(r"^\d{1,2}\.\d{1,2}\.\d{4}"), "%d.%m.%Y"),
            (re(r"^\d{4}-\d{1,2}-\d{1,2}"), "%Y-%m-%d"),
            (re(r"^\d{4}\.\d{1,2}\.\d{1,2}"), "%Y.%m.%d"),
        ]
    })
}

/// Parses a date given as `DD-MM-YYYY`, `DD.MM.YYYY`, `YYYY-MM-DD` or `YYYY.MM.DD`.
///
/// # Errors
///
/// [`TcmbError::UnrecognizedDateFormat`] if no shape matches, [`TcmbError::InvalidDate`] if a
/// shape matches but the value is not a real date (or carries trailing text).
pub fn parse_date(date_str: &str) -> Result<NaiveDate, TcmbError> {
    let (_, fmt) = shapes()
        .iter()
        .find(|(re, _)| re.is_match(date_str))
        .ok_or_else(|| TcmbError::UnrecognizedDateFormat(date_str.to_string()))?;

    NaiveDate::parse_from_str(date_str, fmt).map_err(|source| TcmbError::InvalidDate {
        input: date_str.to_string(),
        source,
    })
}

/// Converts a date string in one of the accepted shapes to `DD-MM-YYYY`.
///
/// # Errors
///
/// See [`parse_date`].
pub fn standardize_date(date_str: &str) -> Result<String, TcmbError> {
    parse_date(date_str).map(format_date)
}

/// Formats a calendar date the way EVDS expects it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(EVDS_DATE_FORMAT).to_string()
}
