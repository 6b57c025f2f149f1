use crate::config::DEFAULT_CONFIG_FILE;
use crate::models::{Candidate, MetricKind};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

pub const EXIT_OK: i32 = 0;
pub const EXIT_INVALID_ARGUMENTS: i32 = -1;
pub const EXIT_INSUFFICIENT_ARGUMENTS: i32 = -2;

const EXAMPLES: &str = "\
Examples:
  org-repo-ranker -org netflix -s 10     To get the top 10 repos by number of stars
  org-repo-ranker -org netflix -f 5      To get the top 5 repos by number of forks
  org-repo-ranker -org netflix -pr 5     To get the top 5 repos by number of pull requests
  org-repo-ranker -org netflix -cp 5     To get the top 5 repos by contribution percentage";

#[derive(Parser, Debug)]
#[command(name = "org-repo-ranker")]
#[command(about = "Show the top repositories of a GitHub organization")]
#[command(version = "0.1.0")]
#[command(override_usage = "org-repo-ranker -org <organization_name> -<mode> <number_of_repos>")]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Organization whose repositories are ranked
    #[arg(long = "org", value_name = "ORGANIZATION")]
    pub org: String,

    #[command(flatten)]
    pub mode: Mode,

    /// Number of repositories to show
    #[arg(value_name = "N", allow_negative_numbers = true)]
    pub count: i64,

    /// Path to the JSON settings file
    #[arg(long, env = "RANKER_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// GitHub API token, overrides API_TOKEN from the settings file
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Mode {
    /// Show top repositories by number of stars
    #[arg(short = 's', long)]
    pub stars: bool,

    /// Show top repositories by number of forks
    #[arg(short = 'f', long)]
    pub forks: bool,

    /// Show top repositories by number of pull requests (-pr)
    #[arg(long = "pull_requests")]
    pub pull_requests: bool,

    /// Show top repositories by contribution percentage (-cp)
    #[arg(long = "contribution")]
    pub contribution: bool,
}

impl Mode {
    pub fn kind(&self) -> MetricKind {
        if self.stars {
            MetricKind::Stars
        } else if self.forks {
            MetricKind::Forks
        } else if self.pull_requests {
            MetricKind::PullRequests
        } else {
            MetricKind::ContributionPercentage
        }
    }
}

/// Why argument parsing stopped the program.
#[derive(Debug)]
pub struct CliExit {
    pub code: i32,
    pub message: String,
}

/// Rewrite the single-dash spellings (`-org`, `-pr`, `-cp`, `-help`) into
/// the long flags clap understands.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some("-org") => "--org".into(),
            Some("-pr") => "--pull_requests".into(),
            Some("-cp") => "--contribution".into(),
            Some("-help" | "--h" | "h" | "help") => "--help".into(),
            _ => arg,
        })
        .collect()
}

/// Parse a full argv (program name first).
pub fn parse_args<I, T>(args: I) -> Result<Cli, CliExit>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = normalize_args(args);
    if args.len() <= 1 {
        return Err(CliExit {
            code: EXIT_OK,
            message: usage(),
        });
    }

    Cli::try_parse_from(args).map_err(|e| {
        let code = match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
            ErrorKind::MissingRequiredArgument => EXIT_INSUFFICIENT_ARGUMENTS,
            _ => EXIT_INVALID_ARGUMENTS,
        };
        CliExit {
            code,
            message: e.render().to_string(),
        }
    })
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Result block printed by the tool; empty when there is nothing to show.
pub fn format_results(results: &[Candidate]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut out = String::from("--------------\nRESULTS:\n");
    for result in results {
        out.push_str(&result.to_string());
        out.push('\n');
    }
    out.push_str("--------------\n");
    out
}
