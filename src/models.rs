use crate::error::RankerError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Attribute repositories are ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Stars,
    Forks,
    PullRequests,
    ContributionPercentage,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Stars,
        MetricKind::Forks,
        MetricKind::PullRequests,
        MetricKind::ContributionPercentage,
    ];

    /// Field name used by the GitHub API and the config-era tooling.
    pub fn attribute(&self) -> &'static str {
        match self {
            MetricKind::Stars => "stargazers_count",
            MetricKind::Forks => "forks_count",
            MetricKind::PullRequests => "pull_requests",
            MetricKind::ContributionPercentage => "contribution_percentage",
        }
    }

    pub fn needs_pull_requests(&self) -> bool {
        matches!(self, MetricKind::PullRequests | MetricKind::ContributionPercentage)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

impl FromStr for MetricKind {
    type Err = RankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stargazers_count" | "stars" => Ok(MetricKind::Stars),
            "forks_count" | "forks" => Ok(MetricKind::Forks),
            "pull_requests" | "prs" => Ok(MetricKind::PullRequests),
            "contribution_percentage" | "contribution" => Ok(MetricKind::ContributionPercentage),
            other => Err(RankerError::InvalidArgument(format!(
                "Unknown counting attribute: {}",
                other
            ))),
        }
    }
}

/// Value a repository is ranked by: a plain count, or a ratio kept in
/// hundredths so it stays exact and totally ordered.
#[derive(Debug, Clone, Copy)]
pub enum Metric {
    Count(u64),
    Ratio { hundredths: u64 },
}

impl Metric {
    /// `numerator / denominator` rounded to two decimals, ties to even on
    /// the exact quotient (`1/8` is `0.12`, `3/8` is `0.38`).
    /// `None` when the denominator is zero.
    pub fn ratio(numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let (n, d) = (numerator as u128 * 100, denominator as u128);
        let (mut hundredths, rem) = (n / d, n % d);
        if 2 * rem > d || (2 * rem == d && hundredths % 2 == 1) {
            hundredths += 1;
        }
        Some(Metric::Ratio {
            hundredths: u64::try_from(hundredths).unwrap_or(u64::MAX),
        })
    }

    fn scaled(&self) -> u128 {
        match *self {
            Metric::Count(n) => n as u128 * 100,
            Metric::Ratio { hundredths } => hundredths as u128,
        }
    }
}

impl PartialEq for Metric {
    fn eq(&self, other: &Self) -> bool {
        self.scaled() == other.scaled()
    }
}

impl Eq for Metric {}

impl PartialOrd for Metric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Metric {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scaled().cmp(&other.scaled())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Metric::Count(n) => write!(f, "{}", n),
            Metric::Ratio { hundredths } => {
                let (whole, frac) = (hundredths / 100, hundredths % 100);
                if frac % 10 == 0 {
                    write!(f, "{}.{}", whole, frac / 10)
                } else {
                    write!(f, "{}.{:02}", whole, frac)
                }
            }
        }
    }
}

/// Unit held by the top-N selector. Field order defines the total order:
/// metric first, then name, then id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate {
    pub metric: Metric,
    pub name: String,
    pub id: u64,
}

impl Candidate {
    pub fn new(metric: Metric, name: impl Into<String>, id: u64) -> Self {
        Self {
            metric,
            name: name.into(),
            id,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repo: {} ID: {} Count: {}", self.name, self.id, self.metric)
    }
}

/// Result of computing one repository's metric.
#[derive(Debug)]
pub enum MetricOutcome {
    Computed(Metric),
    Skipped(String),
}

/// A repository left out of a ranking and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub name: String,
    pub reason: String,
}

/// Output of one ranking run.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Descending by metric.
    pub results: Vec<Candidate>,
    pub skipped: Vec<Skipped>,
}
