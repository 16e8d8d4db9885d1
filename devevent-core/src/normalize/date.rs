//! Calendar date canonicalization (`YYYY-MM-DD`)

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::ValidationError;

/// Date-only layouts tried in order. `%B` also accepts abbreviated month
/// names when parsing.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
    "%A %B %d %Y",
];

/// Local date-time layouts without an offset; only the date part is kept.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a calendar date in any supported layout and emit `YYYY-MM-DD`.
///
/// Inputs carrying an offset (RFC 3339, RFC 2822) are converted to UTC
/// before the date is taken.
pub fn normalize_date(input: &str) -> Result<String, ValidationError> {
    parse_date(input.trim())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or(ValidationError::InvalidDate)
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_pass_through() {
        assert_eq!(normalize_date("2025-03-05").unwrap(), "2025-03-05");
        assert_eq!(normalize_date(" 2025-12-31 ").unwrap(), "2025-12-31");
    }

    #[test]
    fn month_names() {
        assert_eq!(normalize_date("March 5, 2025").unwrap(), "2025-03-05");
        assert_eq!(normalize_date("Mar 5 2025").unwrap(), "2025-03-05");
        assert_eq!(normalize_date("5 March 2025").unwrap(), "2025-03-05");
        assert_eq!(normalize_date("november 20, 2024").unwrap(), "2024-11-20");
    }

    #[test]
    fn numeric_layouts() {
        assert_eq!(normalize_date("2025/03/05").unwrap(), "2025-03-05");
        assert_eq!(normalize_date("03/05/2025").unwrap(), "2025-03-05");
    }

    #[test]
    fn datetimes_use_utc_date() {
        assert_eq!(normalize_date("2025-03-05T23:30:00-05:00").unwrap(), "2025-03-06");
        assert_eq!(normalize_date("2025-03-05T10:00:00Z").unwrap(), "2025-03-05");
        assert_eq!(normalize_date("Wed, 05 Mar 2025 10:00:00 +0000").unwrap(), "2025-03-05");
        assert_eq!(normalize_date("2025-03-05T10:00").unwrap(), "2025-03-05");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(normalize_date("not-a-date"), Err(ValidationError::InvalidDate));
        assert_eq!(normalize_date(""), Err(ValidationError::InvalidDate));
        assert_eq!(normalize_date("2025-02-30"), Err(ValidationError::InvalidDate));
        assert_eq!(normalize_date("13/45/2025"), Err(ValidationError::InvalidDate));
    }
}
