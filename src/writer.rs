// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Persistence of the activity summary.
//!
//! The document is rendered as pretty-printed JSON with a single trailing
//! newline, written to a sibling temporary file and renamed over the
//! destination so readers never observe a truncated file.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf}
};

use crate::{
    error::{self, Error},
    summary::ActivitySummary
};

/// Renders the summary exactly as it is written to disk.
///
/// # Errors
///
/// Returns [`Error::Serialize`](Error::Serialize) if encoding fails.
pub fn render_summary(summary: &ActivitySummary) -> Result<String, Error> {
    let mut rendered = serde_json::to_string_pretty(summary)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Writes the summary to `path`, creating parent directories as needed.
///
/// Previous contents are replaced entirely.
///
/// # Errors
///
/// Returns [`Error::Write`](Error::Write) when directories or files cannot be
/// created and [`Error::Serialize`](Error::Serialize) if encoding fails.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use chrono::Utc;
/// use gh_activity::{ActivityConfig, fallback_summary, write_summary};
///
/// # fn main() -> Result<(), gh_activity::Error> {
/// let config = ActivityConfig::default();
/// let summary = fallback_summary(&config, "offline", Utc::now());
/// write_summary(&summary, Path::new("assets/data/github-activity.json"))?;
/// # Ok(())
/// # }
/// ```
pub fn write_summary(summary: &ActivitySummary, path: &Path) -> Result<(), Error> {
    let contents = render_summary(summary)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| error::write_error(parent, source))?;
    }

    let staging = staging_path(path)?;
    write_file(&staging, contents.as_bytes())?;
    fs::rename(&staging, path).map_err(|source| {
        let _ = fs::remove_file(&staging);
        error::write_error(path, source)
    })
}

fn staging_path(path: &Path) -> Result<PathBuf, Error> {
    let file_name = path.file_name().ok_or_else(|| {
        error::write_error(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name")
        )
    })?;

    let mut staged = std::ffi::OsString::from(".");
    staged.push(file_name);
    staged.push(".tmp");
    Ok(path.with_file_name(staged))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| error::write_error(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|source| error::write_error(path, source))?;
    writer
        .flush()
        .map_err(|source| error::write_error(path, source))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use super::*;
    use crate::{ActivityConfig, fallback_summary};

    fn sample() -> ActivitySummary {
        let now = Utc
            .with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        fallback_summary(&ActivityConfig::new("octocat", None), "offline", now)
    }

    #[test]
    fn rendered_document_is_pretty_with_single_trailing_newline() {
        let rendered = render_summary(&sample()).expect("render failed");
        assert!(rendered.starts_with("{\n  \"generated_at\": \"2025-06-15T12:00:00Z\""));
        assert!(rendered.ends_with("}\n"));
        assert!(!rendered.ends_with("\n\n"));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("assets/data/github-activity.json");

        write_summary(&sample(), &path).expect("write failed");

        let contents = fs::read_to_string(&path).expect("failed to read output");
        let parsed: ActivitySummary = serde_json::from_str(&contents).expect("valid JSON");
        assert_eq!(parsed, sample());
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn overwrites_previous_contents_and_leaves_no_staging_file() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("github-activity.json");
        fs::write(&path, format!("{{\"stale\": \"{}\"}}", "x".repeat(4096)))
            .expect("failed to seed output");

        write_summary(&sample(), &path).expect("write failed");

        let contents = fs::read_to_string(&path).expect("failed to read output");
        assert!(!contents.contains("stale"));
        let entries: Vec<_> = fs::read_dir(dir.path())
            .expect("failed to list dir")
            .flatten()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn reports_unwritable_destination() {
        let dir = tempdir().expect("failed to create tempdir");
        let blocker = dir.path().join("assets");
        fs::write(&blocker, "not a directory").expect("failed to create blocker");

        let error = write_summary(&sample(), &blocker.join("data/github-activity.json"))
            .expect_err("expected write error");
        assert!(matches!(error, Error::Write { .. }));
        assert!(!error.is_recoverable());
    }
}
