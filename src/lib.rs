//! Utilities for refreshing the GitHub activity summary shown in a website
//! header.
//!
//! A run fetches either the contribution calendar (GraphQL) or the recent
//! event listing (REST) for one account, normalizes the response into a few
//! counters and dates, and writes a small JSON document. Any failure before
//! the write produces a zeroed fallback document instead, so the site always
//! receives a well-formed file.

mod calendar;
mod config;
mod error;
mod events;
mod fetch;
mod pipeline;
mod summary;
mod time;
mod writer;

pub use calendar::{CalendarActivity, ContributionDay, last_active_date, normalize_calendar};
pub use config::{
    ActivityConfig, ApiToken, DEFAULT_API_URL, DEFAULT_OUTPUT_PATH, DEFAULT_RECENT_DAYS,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USERNAME, Endpoint, VariantKind,
};
pub use error::{Error, write_error};
pub use events::{EventActivity, normalize_events};
pub use fetch::{
    AnyFetcher, CalendarFetcher, EventsFetcher, Fetcher, GRAPHQL_QUERY, RawApiResponse,
    select_fetcher, validate_events_body, validate_graphql_body,
};
pub use pipeline::{build_summary, collect_live, run, summarize_response, summarize_with_fallback};
pub use summary::{
    ActivitySummary, NO_ACTIVITY_SUMMARY, Source, calendar_sentence, events_sentence,
    fallback_summary, summarize_calendar, summarize_events,
};
pub use time::{format_utc_date, format_utc_timestamp, parse_event_timestamp};
pub use writer::{render_summary, write_summary};
