// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Run configuration for the activity pipeline.
//!
//! The binary resolves command-line flags and environment variables once at
//! startup and hands the resulting [`ActivityConfig`] to the pipeline. Values
//! are normalized on construction so downstream stages never see blank
//! usernames or whitespace-only tokens.

use std::{fmt, path::PathBuf, time::Duration};

use clap::ValueEnum;

use crate::error::Error;

/// Account summarized when no username is configured.
pub const DEFAULT_USERNAME: &str = "maxhabra";
/// Destination consumed by the website header script.
pub const DEFAULT_OUTPUT_PATH: &str = "assets/data/github-activity.json";
/// Base URL of the public GitHub REST and GraphQL API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Base URL used for profile and activity links.
pub const PROFILE_BASE_URL: &str = "https://github.com";
/// Request timeout applied to the single API call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Number of calendar days kept in `recent_days`.
pub const DEFAULT_RECENT_DAYS: usize = 84;

/// Data source requested by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum,)]
pub enum VariantKind
{
    /// Contribution calendar when a token is available, public events
    /// otherwise.
    #[default]
    Auto,
    /// Contribution calendar through the GraphQL API. Requires a token.
    Calendar,
    /// Recent events through the REST API.
    Events,
}

/// Concrete endpoint chosen after combining [`VariantKind`] with the
/// available credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum Endpoint
{
    /// `POST /graphql` contribution calendar query.
    Calendar,
    /// `GET /users/{user}/events` with a bearer token.
    AuthenticatedEvents,
    /// `GET /users/{user}/events/public` without credentials.
    PublicEvents,
}

/// Bearer token with a redacted `Debug` representation.
#[derive(Clone, PartialEq, Eq,)]
pub struct ApiToken(String,);

impl ApiToken
{
    /// Wraps a token, returning `None` when it is blank after trimming.
    pub fn new(raw: &str,) -> Option<Self,>
    {
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_owned(),),) }
    }

    /// Exposes the token for the `Authorization` header.
    pub fn expose(&self,) -> &str
    {
        &self.0
    }
}

impl fmt::Debug for ApiToken
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str("ApiToken(***)",)
    }
}

/// Fully resolved settings for one pipeline run.
#[derive(Debug, Clone,)]
pub struct ActivityConfig
{
    /// GitHub login whose activity is summarized.
    pub username:    String,
    /// Optional token; `None` means unauthenticated.
    pub token:       Option<ApiToken,>,
    /// Requested data source.
    pub variant:     VariantKind,
    /// Destination of the JSON summary.
    pub output_path: PathBuf,
    /// API base URL without a trailing slash.
    pub api_url:     String,
    /// Timeout for the single network request.
    pub timeout:     Duration,
    /// Size of the `recent_days` calendar window.
    pub recent_days: usize,
}

impl Default for ActivityConfig
{
    fn default() -> Self
    {
        Self {
            username:    DEFAULT_USERNAME.to_owned(),
            token:       None,
            variant:     VariantKind::Auto,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH,),
            api_url:     DEFAULT_API_URL.to_owned(),
            timeout:     Duration::from_secs(DEFAULT_TIMEOUT_SECS,),
            recent_days: DEFAULT_RECENT_DAYS,
        }
    }
}

impl ActivityConfig
{
    /// Builds a configuration for `username` with an optional raw token.
    ///
    /// Blank usernames fall back to [`DEFAULT_USERNAME`] and blank tokens are
    /// treated as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use gh_activity::ActivityConfig;
    ///
    /// let config = ActivityConfig::new("  octocat ", Some("   "),);
    /// assert_eq!(config.username, "octocat");
    /// assert!(config.token.is_none());
    /// ```
    pub fn new(username: &str, token: Option<&str,>,) -> Self
    {
        let trimmed = username.trim();
        let username = if trimmed.is_empty() { DEFAULT_USERNAME } else { trimmed };

        Self {
            username: username.to_owned(),
            token: token.and_then(ApiToken::new,),
            ..Self::default()
        }
    }

    /// Sets the requested data source.
    pub fn with_variant(mut self, variant: VariantKind,) -> Self
    {
        self.variant = variant;
        self
    }

    /// Sets the API base URL, dropping trailing slashes.
    pub fn with_api_url(mut self, api_url: &str,) -> Self
    {
        self.api_url = api_url.trim().trim_end_matches('/',).to_owned();
        self
    }

    /// Returns the public profile link written to the summary.
    pub fn profile_url(&self,) -> String
    {
        format!("{PROFILE_BASE_URL}/{}", self.username)
    }

    /// Returns the activity link written to the summary.
    pub fn activity_url(&self,) -> String
    {
        self.profile_url()
    }

    /// Returns the identifying `User-Agent` sent with every request.
    pub fn user_agent(&self,) -> String
    {
        format!("{}-activity-updater", self.username)
    }

    /// Chooses the endpoint for the configured variant and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the calendar variant is
    /// requested explicitly without a token.
    pub fn endpoint(&self,) -> Result<Endpoint, Error,>
    {
        match (self.variant, self.token.is_some(),) {
            (VariantKind::Auto, true,) | (VariantKind::Calendar, true,) => Ok(Endpoint::Calendar,),
            (VariantKind::Calendar, false,) => {
                Err(Error::configuration("Missing GITHUB_TOKEN secret",),)
            }
            (VariantKind::Events, true,) => Ok(Endpoint::AuthenticatedEvents,),
            (VariantKind::Auto, false,) | (VariantKind::Events, false,) => {
                Ok(Endpoint::PublicEvents,)
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn blank_username_falls_back_to_default()
    {
        let config = ActivityConfig::new("   ", None,);
        assert_eq!(config.username, DEFAULT_USERNAME);
        assert_eq!(config.profile_url(), "https://github.com/maxhabra");
        assert_eq!(config.user_agent(), "maxhabra-activity-updater");
    }

    #[test]
    fn token_is_trimmed_and_redacted()
    {
        let config = ActivityConfig::new("octocat", Some(" ghp_secret \n",),);
        let token = config.token.as_ref().expect("token present",);
        assert_eq!(token.expose(), "ghp_secret");

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("ApiToken(***)"));
    }

    #[test]
    fn api_url_trailing_slash_is_removed()
    {
        let config = ActivityConfig::new("octocat", None,).with_api_url("http://127.0.0.1:9/",);
        assert_eq!(config.api_url, "http://127.0.0.1:9");
    }

    #[test]
    fn auto_variant_prefers_calendar_with_token()
    {
        let config = ActivityConfig::new("octocat", Some("token",),);
        assert_eq!(config.endpoint().expect("endpoint",), Endpoint::Calendar);
    }

    #[test]
    fn auto_variant_uses_public_events_without_token()
    {
        let config = ActivityConfig::new("octocat", Some("",),);
        assert_eq!(config.endpoint().expect("endpoint",), Endpoint::PublicEvents);
    }

    #[test]
    fn events_variant_uses_authenticated_endpoint_with_token()
    {
        let config =
            ActivityConfig::new("octocat", Some("token",),).with_variant(VariantKind::Events,);
        assert_eq!(config.endpoint().expect("endpoint",), Endpoint::AuthenticatedEvents);
    }

    #[test]
    fn calendar_variant_without_token_is_a_configuration_error()
    {
        let config = ActivityConfig::new("octocat", None,).with_variant(VariantKind::Calendar,);
        let error = config.endpoint().expect_err("expected configuration error",);
        match error {
            Error::Configuration {
                message,
            } => assert_eq!(message, "Missing GITHUB_TOKEN secret"),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }
}
