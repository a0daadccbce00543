// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Normalization of contribution calendar responses.
//!
//! The GraphQL API nests per-day counts inside weeks. The normalizer flattens
//! that grid into a chronological list of [`ContributionDay`] records and
//! derives the counters exposed in the summary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Level reported by GitHub when a day has no contributions.
const DEFAULT_LEVEL: &str = "NONE";
/// Number of trailing calendar days summed into the weekly counter.
const WEEK_DAYS: usize = 7;

/// Contribution count for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct ContributionDay
{
    /// Day in `YYYY-MM-DD` format as reported by the API.
    pub date:  String,
    /// Contributions recorded that day.
    pub count: u64,
    /// GitHub intensity bucket such as `NONE` or `FOURTH_QUARTILE`.
    pub level: String,
}

/// Flattened contribution calendar.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct CalendarActivity
{
    /// Total contributions over the calendar year.
    pub total_contributions:    u64,
    /// Every day of the calendar in chronological order.
    pub days:                   Vec<ContributionDay,>,
    /// Most recent day with a nonzero count.
    pub last_contribution_date: Option<String,>,
}

impl CalendarActivity
{
    /// Returns the trailing `window` days in their original order.
    ///
    /// The whole calendar is returned when it is shorter than `window`.
    pub fn recent_days(&self, window: usize,) -> &[ContributionDay]
    {
        let start = self.days.len().saturating_sub(window,);
        &self.days[start..]
    }

    /// Sum of the counts over the last seven calendar days.
    pub fn week_count(&self,) -> u64
    {
        self.recent_days(WEEK_DAYS,).iter().map(|day| day.count,).sum()
    }

    /// Count recorded on the last calendar day.
    pub fn day_count(&self,) -> u64
    {
        self.days.last().map_or(0, |day| day.count,)
    }
}

#[derive(Debug, Deserialize,)]
struct GraphqlEnvelope
{
    #[serde(default)]
    data: Option<GraphqlData,>,
}

#[derive(Debug, Deserialize,)]
struct GraphqlData
{
    #[serde(default)]
    user: Option<GraphqlUser,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct GraphqlUser
{
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection
{
    contribution_calendar: Option<ContributionCalendar,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct ContributionCalendar
{
    #[serde(default)]
    total_contributions: u64,
    #[serde(default)]
    weeks:               Vec<CalendarWeek,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct CalendarWeek
{
    #[serde(default)]
    contribution_days: Vec<CalendarDay,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct CalendarDay
{
    date:               String,
    #[serde(default)]
    contribution_count: u64,
    #[serde(default)]
    contribution_level: Option<String,>,
}

/// Normalizes a GraphQL contribution calendar response.
///
/// The response is borrowed and left untouched.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] when the document does not contain a
/// `data.user.contributionsCollection.contributionCalendar` object or when a
/// field has an unexpected type.
///
/// # Examples
///
/// ```
/// use gh_activity::normalize_calendar;
///
/// let response = serde_json::json!({
///     "data": {"user": {"contributionsCollection": {"contributionCalendar": {
///         "totalContributions": 3,
///         "weeks": [{"contributionDays": [
///             {"date": "2025-01-01", "contributionCount": 3, "contributionLevel": "FIRST_QUARTILE"},
///             {"date": "2025-01-02", "contributionCount": 0, "contributionLevel": "NONE"}
///         ]}]
///     }}}}
/// });
/// let calendar = normalize_calendar(&response,)?;
/// assert_eq!(calendar.last_contribution_date.as_deref(), Some("2025-01-01"));
/// # Ok::<(), gh_activity::Error>(())
/// ```
pub fn normalize_calendar(response: &Value,) -> Result<CalendarActivity, Error,>
{
    let envelope = GraphqlEnvelope::deserialize(response,)
        .map_err(|error| Error::malformed(format!("invalid contribution calendar: {error}"),),)?;

    let calendar = envelope
        .data
        .and_then(|data| data.user,)
        .and_then(|user| user.contributions_collection.contribution_calendar,)
        .ok_or_else(|| Error::malformed("Missing contribution calendar data",),)?;

    let days = flatten_weeks(calendar.weeks,);
    let last_contribution_date = last_active_date(&days,).map(str::to_owned,);

    Ok(CalendarActivity {
        total_contributions: calendar.total_contributions,
        days,
        last_contribution_date,
    },)
}

fn flatten_weeks(weeks: Vec<CalendarWeek,>,) -> Vec<ContributionDay,>
{
    weeks
        .into_iter()
        .flat_map(|week| week.contribution_days,)
        .map(|day| ContributionDay {
            date:  day.date,
            count: day.contribution_count,
            level: day.contribution_level.unwrap_or_else(|| DEFAULT_LEVEL.to_owned(),),
        },)
        .collect()
}

/// Finds the most recent day with a nonzero count by scanning from the end.
pub fn last_active_date(days: &[ContributionDay],) -> Option<&str,>
{
    days.iter().rev().find(|day| day.count > 0,).map(|day| day.date.as_str(),)
}
