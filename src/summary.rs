// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The persisted activity record and the sentences describing it.
//!
//! Both data sources produce the same [`ActivitySummary`] shape. The
//! [`Source`] tag tells consumers which path produced the record; counters a
//! source does not measure are reported as zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{CalendarActivity, ContributionDay},
    config::{ActivityConfig, Endpoint},
    events::EventActivity,
    time::{format_utc_date, format_utc_timestamp}
};

/// Sentence used when no recent activity date is known.
pub const NO_ACTIVITY_SUMMARY: &str = "No recent GitHub activity found.";

/// Code path that produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Contribution calendar from the GraphQL API.
    Graphql,
    /// Authenticated event listing.
    EventsAuthenticated,
    /// Public event listing.
    EventsPublic,
    /// Zeroed record written after a failure.
    Fallback
}

impl Source {
    /// Tag recorded when `endpoint` answers successfully.
    pub fn for_endpoint(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Calendar => Self::Graphql,
            Endpoint::AuthenticatedEvents => Self::EventsAuthenticated,
            Endpoint::PublicEvents => Self::EventsPublic
        }
    }
}

/// Record written to the website data file.
///
/// Field names and types are a stable contract with the site's header
/// script. Optional fields serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Generation time, `YYYY-MM-DDTHH:MM:SSZ`.
    pub generated_at:         String,
    /// Public profile link.
    pub profile_url:          String,
    /// Link opened from the header widget.
    pub activity_url:         String,
    /// Contributions over the last year (calendar only).
    pub yearly_contributions: u64,
    /// Activity over the last seven days.
    pub week_events:          u64,
    /// Activity over the last day.
    pub day_events:           u64,
    /// Date of the most recent activity, `YYYY-MM-DD`.
    pub last_event_date:      Option<String>,
    /// Timestamp of the most recent event (events only).
    pub last_event_at:        Option<String>,
    /// Trailing calendar window (calendar only).
    pub recent_days:          Vec<ContributionDay>,
    /// Code path that produced the record.
    pub source:               Source,
    /// Human readable sentence shown as the widget tooltip.
    pub summary:              String
}

/// Builds the summary for a normalized contribution calendar.
pub fn summarize_calendar(
    config: &ActivityConfig,
    calendar: &CalendarActivity,
    now: DateTime<Utc>
) -> ActivitySummary {
    let last_date = calendar.last_contribution_date.clone();

    ActivitySummary {
        generated_at:         format_utc_timestamp(now),
        profile_url:          config.profile_url(),
        activity_url:         config.activity_url(),
        yearly_contributions: calendar.total_contributions,
        week_events:          calendar.week_count(),
        day_events:           calendar.day_count(),
        summary:              calendar_sentence(calendar.total_contributions, last_date.as_deref()),
        last_event_date:      last_date,
        last_event_at:        None,
        recent_days:          calendar.recent_days(config.recent_days).to_vec(),
        source:               Source::Graphql
    }
}

/// Builds the summary for a normalized event listing.
pub fn summarize_events(
    config: &ActivityConfig,
    events: &EventActivity,
    source: Source,
    now: DateTime<Utc>
) -> ActivitySummary {
    let last_date = events.last_event_at.map(format_utc_date);

    ActivitySummary {
        generated_at: format_utc_timestamp(now),
        profile_url: config.profile_url(),
        activity_url: config.activity_url(),
        yearly_contributions: 0,
        week_events: events.week_events,
        day_events: events.day_events,
        summary: events_sentence(events.week_events, last_date.as_deref()),
        last_event_date: last_date,
        last_event_at: events.last_event_at.map(format_utc_timestamp),
        recent_days: Vec::new(),
        source
    }
}

/// Builds the zeroed record written when live data is unavailable.
///
/// The record is complete by construction, so writing it cannot fail on
/// account of its contents.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use gh_activity::{ActivityConfig, Source, fallback_summary};
///
/// let config = ActivityConfig::new("octocat", None);
/// let summary = fallback_summary(&config, "request timed out after 30s", Utc::now());
/// assert_eq!(summary.source, Source::Fallback);
/// assert_eq!(summary.week_events, 0);
/// assert!(summary.summary.contains("timed out"));
/// ```
pub fn fallback_summary(
    config: &ActivityConfig,
    description: &str,
    now: DateTime<Utc>
) -> ActivitySummary {
    ActivitySummary {
        generated_at:         format_utc_timestamp(now),
        profile_url:          config.profile_url(),
        activity_url:         config.activity_url(),
        yearly_contributions: 0,
        week_events:          0,
        day_events:           0,
        last_event_date:      None,
        last_event_at:        None,
        recent_days:          Vec::new(),
        source:               Source::Fallback,
        summary:              fallback_sentence(description)
    }
}

/// Sentence for calendar data.
pub fn calendar_sentence(total: u64, last_date: Option<&str>) -> String {
    match last_date {
        Some(date) => {
            format!("{total} contributions in the last year. Last contribution: {date}.")
        }
        None => NO_ACTIVITY_SUMMARY.to_owned()
    }
}

/// Sentence for event data.
pub fn events_sentence(week_events: u64, last_date: Option<&str>) -> String {
    match last_date {
        Some(date) => format!("{week_events} events in the last 7 days. Last event: {date}."),
        None => NO_ACTIVITY_SUMMARY.to_owned()
    }
}

fn fallback_sentence(description: &str) -> String {
    format!("Failed to refresh GitHub activity: {description}")
}
