//! Parsers used to test whether a raw field looks like some type.
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Logic for parsing a string into some type.
pub trait Parser {
    /// The type we'll be producing.
    type Type;

    /// Parse a string into `Type`, returning None if the parse cannot be done.
    fn parse(&mut self, s: &str) -> Option<Self::Type>;
}

/// Parses finite decimal numbers.
///
/// Surrounding whitespace is ignored. Integers, decimals and exponent notation
/// are accepted, 'inf' and 'NaN' are not. A blank string parses as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumericParser;

impl Parser for NumericParser {
    type Type = f64;
    fn parse(&mut self, s: &str) -> Option<Self::Type> {
        let s = s.trim();
        if s.is_empty() {
            return Some(0.0);
        }
        // Reject things like 'inf', 'infinity' and 'nan' early, f64 parsing
        // accepts them.
        if !s.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        let v: f64 = s.parse().ok()?;
        if v.is_finite() { Some(v) } else { None }
    }
}

/// Minute or second precision timestamps with a numeric offset that RFC 3339
/// parsing doesn't cover.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%z",
];

/// Formats with both a date and time component.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d %Y %H:%M:%S",
    "%d %B %Y %H:%M:%S",
    "%a %b %d %Y %H:%M:%S",
];

/// Date only formats.
///
/// '%B' accepts both full and abbreviated month names when parsing.
///
/// Month and day ordering for slash separated dates is ambiguous, both are
/// tried.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%a, %d %b %Y",
    "%a %b %d %Y",
    "%A, %B %d, %Y",
    "%Y-%b-%d",
];

/// Permissive parser for calendar dates and timestamps.
///
/// Example inputs:
///
/// '2024'
/// '2024-01'
/// '2024-01-01'
/// '2024-01-01T10:30Z'
/// '2024-01-01T10:30:00Z'
/// '2024-01-01 10:30:00.123'
/// '01/15/2024'
/// 'Jan 5, 2024'
/// '5 January 2024'
/// 'Tue, 1 Jul 2003 10:52:37 +0200'
///
/// Values carrying an offset are normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeParser;

impl Parser for DateTimeParser {
    type Type = NaiveDateTime;
    fn parse(&mut self, s: &str) -> Option<Self::Type> {
        let s = s.trim();
        // Every accepted format contains at least one digit, skip the format
        // loop for plain text.
        if !s.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Some(dt.naive_utc());
        }
        for format in OFFSET_DATETIME_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, format) {
                return Some(dt.naive_utc());
            }
        }

        // Trailing 'Z' is UTC, same as no offset.
        let naive = s.strip_suffix(['Z', 'z']).unwrap_or(s);
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
                return Some(dt);
            }
        }

        if let Some(date) = parse_reduced_precision(s) {
            return Some(date.and_time(NaiveTime::MIN));
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Some(date.and_time(NaiveTime::MIN));
            }
        }

        None
    }
}

/// Parse the ISO 8601 reduced precision dates 'YYYY' and 'YYYY-MM', resolving
/// to the first day of the year or month.
fn parse_reduced_precision(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() < 4 || !bytes[..4].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let year: i32 = s[..4].parse().ok()?;

    let month = match &bytes[4..] {
        [] => 1,
        [b'-', m1, m2] if m1.is_ascii_digit() && m2.is_ascii_digit() => {
            u32::from((m1 - b'0') * 10 + (m2 - b'0'))
        }
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, 1)
}
