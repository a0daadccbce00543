#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the activity pipeline."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Fetch and normalization failures ([`Error::Configuration`],
//! [`Error::Network`], [`Error::Timeout`] and [`Error::MalformedResponse`])
//! are recoverable: the pipeline converts them into a fallback payload. The
//! remaining variants describe output failures that abort the run.

use std::path::{Path, PathBuf};

/// Unified error type returned by the fetchers, normalizers and writer.
///
/// Variants never carry the API token. Messages originating from the remote
/// service are kept verbatim so they can be embedded in the fallback summary.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The selected variant needs a credential or setting that is missing.
    #[error("configuration error: {message}")]
    Configuration {
        /// Human readable description of the missing setting.
        message: String
    },
    /// Connection failures and non-success HTTP statuses.
    #[error("network error: {message}")]
    Network {
        /// Transport or status description.
        message: String
    },
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {seconds}s")]
    Timeout {
        /// Timeout that elapsed, in seconds.
        seconds: u64
    },
    /// The response body does not have the expected shape.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Description of the shape violation or API-reported error.
        message: String
    },
    /// Wraps I/O errors that occur while persisting the summary file.
    #[error("failed to write activity summary at {path:?}: {source}")]
    Write {
        /// Location of the output file.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    },
    /// Wraps serialization errors when encoding the summary.
    #[error("failed to serialize activity summary: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    }
}

impl Error {
    /// Constructs a configuration error from the provided displayable value.
    pub fn configuration<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Configuration {
            message: message.into()
        }
    }

    /// Constructs a network error from the provided displayable value.
    pub fn network<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Network {
            message: message.into()
        }
    }

    /// Constructs a malformed response error from the provided value.
    pub fn malformed<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::MalformedResponse {
            message: message.into()
        }
    }

    /// Returns `true` when the pipeline should divert to the fallback
    /// payload instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::Network { .. }
                | Self::Timeout { .. }
                | Self::MalformedResponse { .. }
        )
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Write`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn configuration_constructor_populates_message() {
        let error = Error::configuration("Missing GITHUB_TOKEN secret");
        match error {
            Error::Configuration {
                ref message
            } => {
                assert_eq!(message, "Missing GITHUB_TOKEN secret");
            }
            other => panic!("expected configuration error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::network("HTTP 502 Bad Gateway");
        assert_eq!(error.to_string(), error.to_display_string());
        assert_eq!(error.to_string(), "network error: HTTP 502 Bad Gateway");
    }

    #[test]
    fn timeout_display_includes_seconds() {
        let error = Error::Timeout {
            seconds: 30
        };
        assert_eq!(error.to_string(), "request timed out after 30s");
    }

    #[test]
    fn fetch_failures_are_recoverable() {
        assert!(Error::configuration("x").is_recoverable());
        assert!(Error::network("x").is_recoverable());
        assert!(Error::malformed("x").is_recoverable());
        assert!(
            Error::Timeout {
                seconds: 1
            }
            .is_recoverable()
        );
    }

    #[test]
    fn write_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/github-activity.json");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = super::write_error(path, io_error);

        assert!(!error.is_recoverable());
        match error {
            Error::Write {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected write error, got {other:?}")
        }
    }

    #[test]
    fn serde_json_conversion_maps_to_serialize_variant() {
        let invalid = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Serialize { .. }));
    }
}
