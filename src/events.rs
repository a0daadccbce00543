// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Normalization of recent event listings.
//!
//! GitHub returns events newest first. The most recent timestamp is therefore
//! taken positionally from the first event with a parseable `created_at`; the
//! list is never re-sorted.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::debug;

use crate::time::parse_event_timestamp;

/// Aggregated counters derived from an event listing.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct EventActivity
{
    /// Events created within the last seven days.
    pub week_events:   u64,
    /// Events created within the last day.
    pub day_events:    u64,
    /// Timestamp of the most recent event.
    pub last_event_at: Option<DateTime<Utc,>,>,
    /// Events ignored because their timestamp could not be parsed.
    pub skipped:       usize,
}

/// Counts events relative to `now`.
///
/// Events whose `created_at` is missing or not in `YYYY-MM-DDTHH:MM:SSZ`
/// format are skipped without failing the run.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use gh_activity::normalize_events;
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0,).unwrap();
/// let events = vec![
///     serde_json::json!({"type": "PushEvent", "created_at": "2025-06-01T10:00:00Z"}),
///     serde_json::json!({"type": "WatchEvent", "created_at": "2025-05-20T10:00:00Z"}),
/// ];
/// let activity = normalize_events(&events, now,);
/// assert_eq!(activity.week_events, 1);
/// assert_eq!(activity.day_events, 1);
/// ```
pub fn normalize_events(events: &[Value], now: DateTime<Utc,>,) -> EventActivity
{
    let week_start = now - Duration::days(7,);
    let day_start = now - Duration::days(1,);

    let mut activity = EventActivity {
        week_events: 0, day_events: 0, last_event_at: None, skipped: 0,
    };

    for event in events {
        let Some(created_at,) = event_timestamp(event,) else {
            activity.skipped += 1;
            continue;
        };

        if activity.last_event_at.is_none() {
            activity.last_event_at = Some(created_at,);
        }
        if created_at >= week_start {
            activity.week_events += 1;
        }
        if created_at >= day_start {
            activity.day_events += 1;
        }
    }

    if activity.skipped > 0 {
        debug!("Skipped {} events without a parseable created_at", activity.skipped);
    }

    activity
}

fn event_timestamp(event: &Value,) -> Option<DateTime<Utc,>,>
{
    event.get("created_at",).and_then(Value::as_str,).and_then(parse_event_timestamp,)
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::time::format_utc_timestamp;

    fn now() -> DateTime<Utc,>
    {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0,).single().expect("valid timestamp",)
    }

    fn event_at(value: DateTime<Utc,>,) -> Value
    {
        json!({"type": "PushEvent", "created_at": format_utc_timestamp(value)})
    }

    #[test]
    fn counts_events_inside_each_window()
    {
        let now = now();
        let events = vec![
            event_at(now,),
            event_at(now - Duration::days(2,),),
            event_at(now - Duration::days(10,),),
        ];

        let activity = normalize_events(&events, now,);
        assert_eq!(activity.week_events, 2);
        assert_eq!(activity.day_events, 1);
        assert_eq!(activity.last_event_at, Some(now));
    }

    #[test]
    fn boundaries_are_inclusive()
    {
        let now = now();
        let events = vec![event_at(now - Duration::days(1,),), event_at(now - Duration::days(7,),)];

        let activity = normalize_events(&events, now,);
        assert_eq!(activity.week_events, 2);
        assert_eq!(activity.day_events, 1);
    }

    #[test]
    fn most_recent_event_is_taken_positionally()
    {
        let now = now();
        let first = now - Duration::days(3,);
        let events = vec![event_at(first,), event_at(now,)];

        let activity = normalize_events(&events, now,);
        assert_eq!(activity.last_event_at, Some(first));
    }

    #[test]
    fn unparseable_events_are_skipped()
    {
        let now = now();
        let events = vec![
            json!({"type": "PushEvent"}),
            json!({"type": "PushEvent", "created_at": "yesterday"}),
            json!({"type": "PushEvent", "created_at": 42}),
            event_at(now - Duration::hours(5,),),
        ];

        let activity = normalize_events(&events, now,);
        assert_eq!(activity.skipped, 3);
        assert_eq!(activity.week_events, 1);
        assert_eq!(activity.day_events, 1);
        assert_eq!(activity.last_event_at, Some(now - Duration::hours(5,)));
    }

    #[test]
    fn empty_listing_has_no_activity()
    {
        let activity = normalize_events(&[], now(),);
        assert_eq!(activity.week_events, 0);
        assert_eq!(activity.day_events, 0);
        assert!(activity.last_event_at.is_none());
    }

    proptest! {
        #[test]
        fn day_count_never_exceeds_week_count(offsets in proptest::collection::vec(0i64..(30 * 24 * 3600), 0..60)) {
            let now = now();
            let events: Vec<Value> = offsets
                .iter()
                .map(|seconds| event_at(now - Duration::seconds(*seconds)))
                .collect();

            let activity = normalize_events(&events, now);
            prop_assert!(activity.day_events <= activity.week_events);
            prop_assert!(activity.week_events as usize <= events.len());
            prop_assert_eq!(activity.skipped, 0);
        }
    }
}
