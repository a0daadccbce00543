// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Timestamp helpers shared by the normalizers and the summary record.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Format accepted for event `created_at` values.
const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formats a UTC timestamp with second precision and a `Z` suffix.
pub fn format_utc_timestamp(value: DateTime<Utc,>,) -> String
{
    value.to_rfc3339_opts(SecondsFormat::Secs, true,)
}

/// Formats the calendar date portion of a UTC timestamp as `YYYY-MM-DD`.
pub fn format_utc_date(value: DateTime<Utc,>,) -> String
{
    value.date_naive().format("%Y-%m-%d",).to_string()
}

/// Parses an event timestamp in the fixed `YYYY-MM-DDTHH:MM:SSZ` format.
///
/// Returns `None` for any other shape, including offsets other than `Z` and
/// fractional seconds.
pub fn parse_event_timestamp(value: &str,) -> Option<DateTime<Utc,>,>
{
    NaiveDateTime::parse_from_str(value, EVENT_TIMESTAMP_FORMAT,)
        .ok()
        .map(|naive| naive.and_utc(),)
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formats_with_z_suffix_and_second_precision()
    {
        let value = Utc
            .with_ymd_and_hms(2025, 3, 9, 7, 5, 1,)
            .single()
            .expect("valid timestamp",)
            + chrono::Duration::milliseconds(450,);

        assert_eq!(format_utc_timestamp(value), "2025-03-09T07:05:01Z");
        assert_eq!(format_utc_date(value), "2025-03-09");
    }

    #[test]
    fn parses_fixed_event_format()
    {
        let parsed = parse_event_timestamp("2025-03-09T07:05:01Z",).expect("parsed timestamp",);
        assert_eq!(format_utc_timestamp(parsed), "2025-03-09T07:05:01Z");
    }

    #[test]
    fn rejects_other_timestamp_shapes()
    {
        assert!(parse_event_timestamp("2025-03-09",).is_none());
        assert!(parse_event_timestamp("2025-03-09T07:05:01+02:00",).is_none());
        assert!(parse_event_timestamp("2025-03-09T07:05:01.123Z",).is_none());
        assert!(parse_event_timestamp("",).is_none());
    }
}
