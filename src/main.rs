//! Command-line interface for the `gh-activity` binary.
//!
//! The binary resolves flags and environment variables into an
//! [`ActivityConfig`], runs the pipeline once and exits. Fetch failures still
//! produce a fallback document and a zero exit status; only output failures
//! set a nonzero status.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process,
    time::Duration,
};

use chrono::Utc;
use clap::{ArgAction, Parser};
use gh_activity::{
    ActivityConfig, DEFAULT_API_URL, DEFAULT_OUTPUT_PATH, DEFAULT_RECENT_DAYS,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USERNAME, Error, VariantKind, build_summary, render_summary,
    run, write_error,
};
use tracing_subscriber::EnvFilter;

/// Command line interface for refreshing the website activity summary.
#[derive(Debug, Parser,)]
#[command(
    name = "gh-activity",
    version,
    about = "Refresh the GitHub activity summary for the website header"
)]
struct Cli
{
    /// GitHub login whose activity is summarized.
    #[arg(long = "username", env = "GITHUB_USERNAME", default_value = DEFAULT_USERNAME)]
    username: String,

    /// Token enabling the contribution calendar and authenticated events.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,

    /// Data source to query.
    #[arg(
        long = "variant",
        env = "GITHUB_ACTIVITY_VARIANT",
        value_enum,
        default_value_t = VariantKind::Auto
    )]
    variant: VariantKind,

    /// Destination of the JSON summary.
    #[arg(
        long = "output",
        value_name = "PATH",
        env = "GITHUB_ACTIVITY_OUTPUT",
        default_value = DEFAULT_OUTPUT_PATH
    )]
    output: PathBuf,

    /// Base URL of the GitHub API.
    #[arg(long = "api-url", value_name = "URL", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Number of calendar days kept in `recent_days`.
    #[arg(long = "recent-days", value_name = "DAYS", default_value_t = DEFAULT_RECENT_DAYS)]
    recent_days: usize,

    /// Print the document to stdout instead of writing the output file.
    #[arg(long = "stdout", action = ArgAction::SetTrue)]
    stdout: bool,
}

impl Cli
{
    fn to_config(&self,) -> ActivityConfig
    {
        let mut config = ActivityConfig::new(&self.username, self.token.as_deref(),)
            .with_variant(self.variant,)
            .with_api_url(&self.api_url,);
        config.output_path = self.output.clone();
        config.timeout = Duration::from_secs(self.timeout,);
        config.recent_days = self.recent_days;
        config
    }
}

/// Entry point that reports unexpected errors and sets the exit status.
#[tokio::main(flavor = "current_thread")]
async fn main()
{
    init_tracing();

    let cli = Cli::parse();
    if let Err(failure,) = execute(&cli,).await {
        eprintln!("{}", failure.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).init();
}

/// Runs the pipeline for the parsed arguments.
///
/// # Errors
///
/// Propagates output failures; fetch failures are absorbed into the
/// fallback document.
async fn execute(cli: &Cli,) -> Result<(), Error,>
{
    let config = cli.to_config();

    if cli.stdout {
        let summary = build_summary(&config, Utc::now(),).await;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        return write_document(&mut handle, &summary,);
    }

    run(&config,).await.map(|_| (),)
}

fn write_document<W: io::Write,>(
    writer: &mut W,
    summary: &gh_activity::ActivitySummary,
) -> Result<(), Error,>
{
    let rendered = render_summary(summary,)?;
    writer
        .write_all(rendered.as_bytes(),)
        .and_then(|()| writer.flush(),)
        .map_err(|source| write_error(Path::new("<stdout>",), source,),)
}
