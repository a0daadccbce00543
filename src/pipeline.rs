// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The fetch, normalize, summarize and write pipeline.
//!
//! Any failure before the writer diverts to [`fallback_summary`], so a run
//! always produces a well-formed document. Only output failures surface as
//! errors to the caller.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    calendar::normalize_calendar,
    config::{ActivityConfig, Endpoint},
    error::Error,
    events::normalize_events,
    fetch::{Fetcher, RawApiResponse, select_fetcher},
    summary::{ActivitySummary, Source, fallback_summary, summarize_calendar, summarize_events},
    writer::write_summary,
};

/// Converts a validated response into a summary.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] when the calendar cannot be
/// normalized or the response kind does not match `endpoint`.
pub fn summarize_response(
    config: &ActivityConfig,
    endpoint: Endpoint,
    response: &RawApiResponse,
    now: DateTime<Utc,>,
) -> Result<ActivitySummary, Error,>
{
    match (endpoint, response,) {
        (Endpoint::Calendar, RawApiResponse::Calendar(body,),) => {
            let calendar = normalize_calendar(body,)?;
            Ok(summarize_calendar(config, &calendar, now,),)
        }
        (Endpoint::AuthenticatedEvents | Endpoint::PublicEvents, RawApiResponse::Events(events,),) => {
            let activity = normalize_events(events, now,);
            Ok(summarize_events(config, &activity, Source::for_endpoint(endpoint,), now,),)
        }
        _ => Err(Error::malformed("response kind does not match the requested endpoint",),),
    }
}

/// Fetches and summarizes live data, propagating the first failure.
///
/// # Errors
///
/// Returns whatever the fetcher or normalizer reported.
pub async fn collect_live<F,>(
    fetcher: &F,
    config: &ActivityConfig,
    now: DateTime<Utc,>,
) -> Result<ActivitySummary, Error,>
where
    F: Fetcher,
{
    let endpoint = fetcher.endpoint();
    info!("Fetching GitHub activity for {} via {:?}", config.username, endpoint);

    let response = fetcher.fetch().await?;
    summarize_response(config, endpoint, &response, now,)
}

/// Fetches and summarizes live data, substituting the fallback record for
/// any failure.
pub async fn summarize_with_fallback<F,>(
    fetcher: &F,
    config: &ActivityConfig,
    now: DateTime<Utc,>,
) -> ActivitySummary
where
    F: Fetcher,
{
    match collect_live(fetcher, config, now,).await {
        Ok(summary,) => summary,
        Err(error,) => divert(config, &error, now,),
    }
}

/// Selects the fetcher for `config` and produces the summary for this run.
///
/// Never fails: configuration problems and fetch failures both yield the
/// fallback record.
pub async fn build_summary(config: &ActivityConfig, now: DateTime<Utc,>,) -> ActivitySummary
{
    match select_fetcher(config,) {
        Ok(fetcher,) => summarize_with_fallback(&fetcher, config, now,).await,
        Err(error,) => divert(config, &error, now,),
    }
}

/// Runs the whole pipeline and writes the summary to the configured path.
///
/// # Errors
///
/// Returns [`Error::Write`] or [`Error::Serialize`] when the output cannot be
/// persisted. Fetch failures are not errors here; they produce a fallback
/// document.
///
/// # Example
///
/// ```no_run
/// use gh_activity::{ActivityConfig, run};
///
/// # async fn example() -> Result<(), gh_activity::Error> {
/// let config = ActivityConfig::new("octocat", None,);
/// let summary = run(&config,).await?;
/// println!("{}", summary.summary);
/// # Ok(())
/// # }
/// ```
pub async fn run(config: &ActivityConfig,) -> Result<ActivitySummary, Error,>
{
    let summary = build_summary(config, Utc::now(),).await;
    write_summary(&summary, &config.output_path,)?;

    info!(
        "Wrote {:?} activity summary to {}: {}",
        summary.source,
        config.output_path.display(),
        summary.summary
    );

    Ok(summary,)
}

fn divert(config: &ActivityConfig, error: &Error, now: DateTime<Utc,>,) -> ActivitySummary
{
    warn!("Falling back to an empty activity summary: {}", error);
    fallback_summary(config, &error.to_display_string(), now,)
}
