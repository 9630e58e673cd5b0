//! Parameter formatting helpers.

use crate::error::{ClientError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// A timestamp parameter accepted by filters and session expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParam {
    /// An already formatted ISO 8601 string, sent unchanged.
    Formatted(String),
    /// A date-time without offset.
    DateTime(NaiveDateTime),
    /// A UTC date-time.
    Utc(DateTime<Utc>),
    /// A calendar date.
    Date(NaiveDate),
}

impl From<&str> for DateParam {
    fn from(value: &str) -> Self {
        Self::Formatted(value.to_string())
    }
}

impl From<String> for DateParam {
    fn from(value: String) -> Self {
        Self::Formatted(value)
    }
}

impl From<NaiveDateTime> for DateParam {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for DateParam {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Utc(value)
    }
}

impl From<NaiveDate> for DateParam {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// Format a date parameter as ISO 8601.
///
/// Date-times are formatted to whole seconds; dates as `YYYY-MM-DD`.
/// Preformatted strings are returned unchanged, which makes the function
/// idempotent.
///
/// # Errors
///
/// Returns [`ClientError::InvalidArgument`] if a preformatted string is
/// empty.
pub fn format_date(date: impl Into<DateParam>) -> Result<String> {
    match date.into() {
        DateParam::Formatted(s) if s.trim().is_empty() => Err(ClientError::InvalidArgument(
            "date string must not be empty".to_string(),
        )),
        DateParam::Formatted(s) => Ok(s),
        DateParam::DateTime(dt) => Ok(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        DateParam::Utc(dt) => Ok(dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        DateParam::Date(d) => Ok(d.format("%Y-%m-%d").to_string()),
    }
}

/// Extract the media type from a `Content-Type` header value.
///
/// Parameters such as `charset` are dropped.
pub fn mimetype_from_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn sample_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 8, 30)
            .unwrap()
            .and_time(NaiveTime::from_hms_micro_opt(0, 17, 37, 123_456).unwrap())
    }

    #[test]
    fn test_format_naive_datetime_drops_micros() {
        assert_eq!(format_date(sample_datetime()).unwrap(), "2013-08-30T00:17:37");
    }

    #[test]
    fn test_format_utc_datetime() {
        let dt = Utc.with_ymd_and_hms(2013, 9, 11, 19, 52, 9).unwrap();
        assert_eq!(format_date(dt).unwrap(), "2013-09-11T19:52:09Z");
    }

    #[test]
    fn test_format_date_only() {
        let d = NaiveDate::from_ymd_opt(2013, 8, 30).unwrap();
        assert_eq!(format_date(d).unwrap(), "2013-08-30");
    }

    #[test]
    fn test_formatted_string_passes_through() {
        for s in [
            "2013-08-30T00:17:37",
            "2013-08-30T00:17:37Z",
            "2013-08-30T00:17:37+02:00",
            "2013-08-30T00:17:37+0200",
            "2013-08-30T00:17Z",
            "2013-08-30T00:17",
            "20130830T001737Z",
            "2013-08-30",
        ] {
            assert_eq!(format_date(s).unwrap(), s);
        }
    }

    #[test]
    fn test_format_is_idempotent() {
        let once = format_date(sample_datetime()).unwrap();
        assert_eq!(format_date(once.clone()).unwrap(), once);

        let utc = Utc::now();
        let once = format_date(utc).unwrap();
        assert_eq!(format_date(once.as_str()).unwrap(), once);
    }

    #[test]
    fn test_empty_string_rejected() {
        assert!(matches!(format_date(""), Err(ClientError::InvalidArgument(_))));
        assert!(matches!(format_date("  "), Err(ClientError::InvalidArgument(_))));
    }

    #[test]
    fn test_mimetype_from_content_type() {
        assert_eq!(mimetype_from_content_type("text/plain"), "text/plain");
        assert_eq!(
            mimetype_from_content_type("text/plain; charset=utf-8"),
            "text/plain"
        );
        assert_eq!(
            mimetype_from_content_type("  application/pdf ;q=1"),
            "application/pdf"
        );
    }
}
