//! Query parameter validation: date ranges, path filters and simulation counts.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::error::ValidationError;

/// Stored timestamps are compared as RFC 3339 text, which only orders correctly for
/// four-digit years.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Inclusive time window `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Builds a range from already parsed bounds.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::StartAfterEnd);
        }
        Ok(Self { start, end })
    }

    /// Validates raw `start_date` / `end_date` query values.
    ///
    /// Checks run in a fixed order and the first failure wins: start present, end present,
    /// start parses, end parses, start not after end. Blank values count as absent.
    pub fn from_params(start: Option<&str>, end: Option<&str>) -> Result<Self, ValidationError> {
        let start = present(start).ok_or(ValidationError::MissingStartDate)?;
        let end = present(end).ok_or(ValidationError::MissingEndDate)?;

        let start = parse_datetime(start)
            .ok_or_else(|| ValidationError::InvalidStartDate(start.to_string()))?;
        let end =
            parse_datetime(end).ok_or_else(|| ValidationError::InvalidEndDate(end.to_string()))?;

        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses an ISO-8601 style datetime into UTC.
///
/// Accepts RFC 3339 with an offset, naive date-times (read as UTC) and bare dates (midnight UTC).
/// Years outside `0..=9999` are rejected, including ones an offset pushes out of range.
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    parse_any(input.trim()).filter(|dt| YEAR_RANGE.contains(&dt.year()))
}

fn parse_any(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Normalized path prefix a message path must start with.
///
/// The raw value gets a single leading `/`, so `""` matches every path and `orders`
/// matches `/orders` and everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter(String);

impl PathFilter {
    pub fn new(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or_default().trim().trim_start_matches('/');
        Self(format!("/{}", raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Validates the raw `count` parameter of a simulation request against `1..=max`.
///
/// Integers too large for `i64` are still integers and are reported as out of range.
pub fn validate_count(raw: Option<&str>, max: u32) -> Result<u32, ValidationError> {
    let raw = present(raw).ok_or(ValidationError::MissingCount)?;
    let count: i64 = match raw.parse() {
        Ok(count) => count,
        Err(_) if is_integer(raw) => return Err(ValidationError::CountOutOfRange { max }),
        Err(_) => return Err(ValidationError::InvalidCount),
    };

    if count < 1 || count > i64::from(max) {
        return Err(ValidationError::CountOutOfRange { max });
    }
    Ok(count as u32)
}

fn is_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
