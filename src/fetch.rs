// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! GitHub API access for the activity pipeline.
//!
//! A run performs exactly one request. [`select_fetcher`] picks the
//! contribution calendar or the event listing based on the configured
//! variant and credentials, and every fetcher validates the top-level shape
//! of the body before handing it to the normalizers. Failed attempts are
//! reported immediately; there are no retries.

use std::time::Duration;

use reqwest::{
    Client, Request, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
};
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    config::{ActivityConfig, ApiToken, Endpoint},
    error::Error,
};

/// Contribution calendar query parameterized by the account login.
pub const GRAPHQL_QUERY: &str = r"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            contributionLevel
            date
          }
        }
      }
    }
  }
}
";

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const JSON_MEDIA_TYPE: &str = "application/json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const EVENTS_PAGE_SIZE: u32 = 100;

/// Response body whose top-level shape matched the requested endpoint.
#[derive(Debug, Clone, PartialEq,)]
pub enum RawApiResponse
{
    /// GraphQL document carrying a `data` member and no `errors`.
    Calendar(Value,),
    /// Event listing, newest first.
    Events(Vec<Value,>,),
}

/// Single-shot access to one GitHub endpoint.
#[allow(async_fn_in_trait)]
pub trait Fetcher
{
    /// Endpoint this fetcher queries.
    fn endpoint(&self,) -> Endpoint;

    /// Performs the request and validates the top-level response shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`], [`Error::Timeout`] or
    /// [`Error::MalformedResponse`] describing the failed attempt.
    async fn fetch(&self,) -> Result<RawApiResponse, Error,>;
}

/// HTTP settings shared by both fetchers.
#[derive(Debug, Clone,)]
struct HttpContext
{
    client:     Client,
    api_url:    String,
    user_agent: String,
    timeout:    Duration,
}

impl HttpContext
{
    fn new(config: &ActivityConfig,) -> Result<Self, Error,>
    {
        let client = Client::builder()
            .timeout(config.timeout,)
            .build()
            .map_err(|e| Error::network(format!("failed to build HTTP client: {e}"),),)?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            user_agent: config.user_agent(),
            timeout: config.timeout,
        },)
    }

    async fn execute(&self, request: Request,) -> Result<Value, Error,>
    {
        debug!("{} {}", request.method(), request.url());

        let response =
            self.client.execute(request,).await.map_err(|e| self.transport_error(e,),)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::network(status_message(status, &body,),),);
        }

        response.json::<Value,>().await.map_err(|e| self.transport_error(e,),)
    }

    fn transport_error(&self, error: reqwest::Error,) -> Error
    {
        if error.is_timeout() {
            Error::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if error.is_decode() {
            Error::malformed(format!("response body is not valid JSON: {error}"),)
        } else {
            Error::network(error.to_string(),)
        }
    }
}

/// Queries the contribution calendar through the GraphQL API.
#[derive(Debug, Clone,)]
pub struct CalendarFetcher
{
    http:     HttpContext,
    username: String,
    token:    ApiToken,
}

impl CalendarFetcher
{
    /// Builds the `POST /graphql` request without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the API URL is invalid.
    pub fn build_request(&self,) -> Result<Request, Error,>
    {
        let payload = json!({
            "query": GRAPHQL_QUERY,
            "variables": {"login": self.username},
        });

        self.http
            .client
            .post(format!("{}/graphql", self.http.api_url),)
            .header(USER_AGENT, &self.http.user_agent,)
            .header(ACCEPT, GITHUB_MEDIA_TYPE,)
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE,)
            .header(API_VERSION_HEADER, API_VERSION,)
            .bearer_auth(self.token.expose(),)
            .json(&payload,)
            .build()
            .map_err(|e| Error::configuration(format!("invalid GraphQL request: {e}"),),)
    }
}

impl Fetcher for CalendarFetcher
{
    fn endpoint(&self,) -> Endpoint
    {
        Endpoint::Calendar
    }

    async fn fetch(&self,) -> Result<RawApiResponse, Error,>
    {
        let request = self.build_request()?;
        let body = self.http.execute(request,).await?;
        validate_graphql_body(body,).map(RawApiResponse::Calendar,)
    }
}

/// Lists recent events through the REST API.
///
/// With a token the authenticated listing is used, otherwise the public one.
#[derive(Debug, Clone,)]
pub struct EventsFetcher
{
    http:     HttpContext,
    username: String,
    token:    Option<ApiToken,>,
}

impl EventsFetcher
{
    /// Builds the `GET /users/{user}/events[/public]` request without
    /// sending it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the API URL is invalid.
    pub fn build_request(&self,) -> Result<Request, Error,>
    {
        let url = match self.token {
            Some(_,) => format!("{}/users/{}/events", self.http.api_url, self.username),
            None => format!("{}/users/{}/events/public", self.http.api_url, self.username),
        };

        let mut builder = self
            .http
            .client
            .get(url,)
            .query(&[("per_page", EVENTS_PAGE_SIZE,)],)
            .header(USER_AGENT, &self.http.user_agent,)
            .header(ACCEPT, GITHUB_MEDIA_TYPE,)
            .header(API_VERSION_HEADER, API_VERSION,);

        if let Some(token,) = &self.token {
            builder = builder.bearer_auth(token.expose(),);
        }

        builder
            .build()
            .map_err(|e| Error::configuration(format!("invalid events request: {e}"),),)
    }
}

impl Fetcher for EventsFetcher
{
    fn endpoint(&self,) -> Endpoint
    {
        if self.token.is_some() { Endpoint::AuthenticatedEvents } else { Endpoint::PublicEvents }
    }

    async fn fetch(&self,) -> Result<RawApiResponse, Error,>
    {
        let request = self.build_request()?;
        let body = self.http.execute(request,).await?;
        validate_events_body(body,).map(RawApiResponse::Events,)
    }
}

/// Fetcher chosen at runtime from the configuration.
#[derive(Debug, Clone,)]
pub enum AnyFetcher
{
    /// Contribution calendar variant.
    Calendar(CalendarFetcher,),
    /// Event listing variant.
    Events(EventsFetcher,),
}

impl Fetcher for AnyFetcher
{
    fn endpoint(&self,) -> Endpoint
    {
        match self {
            Self::Calendar(fetcher,) => fetcher.endpoint(),
            Self::Events(fetcher,) => fetcher.endpoint(),
        }
    }

    async fn fetch(&self,) -> Result<RawApiResponse, Error,>
    {
        match self {
            Self::Calendar(fetcher,) => fetcher.fetch().await,
            Self::Events(fetcher,) => fetcher.fetch().await,
        }
    }
}

/// Selects the fetcher matching the configured variant and credentials.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when the calendar variant is requested
/// without a token and [`Error::Network`] if the HTTP client cannot be
/// initialized.
pub fn select_fetcher(config: &ActivityConfig,) -> Result<AnyFetcher, Error,>
{
    let endpoint = config.endpoint()?;
    let http = HttpContext::new(config,)?;
    let username = config.username.clone();

    let fetcher = match endpoint {
        Endpoint::Calendar => {
            let token = config
                .token
                .clone()
                .ok_or_else(|| Error::configuration("Missing GITHUB_TOKEN secret",),)?;
            AnyFetcher::Calendar(CalendarFetcher {
                http,
                username,
                token,
            },)
        }
        Endpoint::AuthenticatedEvents | Endpoint::PublicEvents => {
            AnyFetcher::Events(EventsFetcher {
                http,
                username,
                token: config.token.clone(),
            },)
        }
    };

    Ok(fetcher,)
}

/// Checks that a GraphQL body is an object with `data` and no `errors`.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] naming the first reported GraphQL
/// error or the shape violation.
pub fn validate_graphql_body(body: Value,) -> Result<Value, Error,>
{
    let Some(object,) = body.as_object() else {
        return Err(Error::malformed(format!(
            "expected a JSON object from the GraphQL API, got {}",
            json_kind(&body,)
        ),),);
    };

    if let Some(errors,) = object.get("errors",).and_then(Value::as_array,)
        && let Some(first,) = errors.first()
    {
        let message = first.get("message",).and_then(Value::as_str,).unwrap_or("unknown",);
        return Err(Error::malformed(format!("GraphQL error: {message}"),),);
    }

    if !object.contains_key("data",) {
        return Err(Error::malformed("GraphQL response is missing data",),);
    }

    Ok(body,)
}

/// Checks that an events body is a JSON array.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] for any other JSON value.
pub fn validate_events_body(body: Value,) -> Result<Vec<Value,>, Error,>
{
    match body {
        Value::Array(events,) => Ok(events,),
        other => Err(Error::malformed(format!(
            "expected a JSON array of events, got {}",
            json_kind(&other,)
        ),),),
    }
}

fn status_message(status: StatusCode, body: &str,) -> String
{
    let api_message = serde_json::from_str::<Value,>(body,)
        .ok()
        .and_then(|value| value.get("message",).and_then(Value::as_str,).map(str::to_owned,),);

    match api_message {
        Some(message,) => format!("HTTP {status}: {message}"),
        None => format!("HTTP {status}"),
    }
}

fn json_kind(value: &Value,) -> &'static str
{
    match value {
        Value::Null => "null",
        Value::Bool(_,) => "a boolean",
        Value::Number(_,) => "a number",
        Value::String(_,) => "a string",
        Value::Array(_,) => "an array",
        Value::Object(_,) => "an object",
    }
}
