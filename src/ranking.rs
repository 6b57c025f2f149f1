use crate::error::{RankerError, Result};
use crate::github::GitHubClient;
use crate::models::{Candidate, Metric, MetricKind, MetricOutcome, Ranking, Skipped};
use crate::top_n::TopN;
use crate::types::GitHubRepo;
use serde_json::Value;
use tracing::{info, warn};

/// Ranks an organization's repositories by one metric.
pub struct Ranker {
    client: GitHubClient,
}

impl Ranker {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Top `n` repositories of `organization` by `kind`, descending.
    ///
    /// Errors mean "no result": bad arguments, a failed listing fetch or an
    /// organization without repositories. Repositories whose metric cannot
    /// be computed land in [`Ranking::skipped`] instead.
    pub async fn rank(&self, organization: &str, n: i64, kind: MetricKind) -> Result<Ranking> {
        self.rank_from(organization, n, kind, None).await
    }

    /// [`rank`](Self::rank) with an explicit first listing URL.
    pub async fn rank_from(
        &self,
        organization: &str,
        n: i64,
        kind: MetricKind,
        start_url: Option<&str>,
    ) -> Result<Ranking> {
        let mut top = TopN::with_requested(n)?;
        if organization.trim().is_empty() {
            return Err(RankerError::InvalidArgument(
                "No organization name specified".to_string(),
            ));
        }

        let repos: Vec<Value> = self.client.fetch_all(organization, start_url).await?;
        if repos.is_empty() {
            return Err(RankerError::NoRepositories(organization.to_string()));
        }

        let total = repos.len();
        let mut skipped = Vec::new();

        for (index, raw) in repos.into_iter().enumerate() {
            let fallback_name = raw
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>")
                .to_string();

            let repo: GitHubRepo = match serde_json::from_value(raw) {
                Ok(repo) => repo,
                Err(e) => {
                    warn!(
                        repo = %fallback_name,
                        error = %e,
                        "Improper data formatted from the repo"
                    );
                    skipped.push(Skipped {
                        name: fallback_name,
                        reason: format!("malformed repository record: {}", e),
                    });
                    continue;
                }
            };

            if kind.needs_pull_requests() {
                info!("Processing individual repo: {}/{} ({})", index + 1, total, repo.name);
            }

            match self.metric_for(organization, &repo, kind).await {
                MetricOutcome::Computed(metric) => {
                    top.offer(Candidate::new(metric, repo.name, repo.id));
                }
                MetricOutcome::Skipped(reason) => {
                    warn!(repo = %repo.name, %reason, "Skipping repository");
                    skipped.push(Skipped {
                        name: repo.name,
                        reason,
                    });
                }
            }
        }

        Ok(Ranking {
            results: top.into_sorted_vec(),
            skipped,
        })
    }

    /// Compute one repository's metric. Never fails the run.
    pub async fn metric_for(
        &self,
        organization: &str,
        repo: &GitHubRepo,
        kind: MetricKind,
    ) -> MetricOutcome {
        match kind {
            MetricKind::Stars => count_field(repo.stars()),
            MetricKind::Forks => count_field(repo.forks()),
            MetricKind::PullRequests => {
                match self.client.estimate_total(organization, &repo.name).await {
                    Ok(total) => MetricOutcome::Computed(Metric::Count(total)),
                    Err(e) => MetricOutcome::Skipped(format!("pull request count failed: {}", e)),
                }
            }
            MetricKind::ContributionPercentage => {
                let forks = match repo.forks() {
                    Ok(0) => return MetricOutcome::Skipped("zero forks".to_string()),
                    Ok(forks) => forks,
                    Err(reason) => return MetricOutcome::Skipped(reason),
                };
                match self.client.estimate_total(organization, &repo.name).await {
                    Ok(pulls) => match Metric::ratio(pulls, forks) {
                        Some(metric) => MetricOutcome::Computed(metric),
                        None => MetricOutcome::Skipped("zero forks".to_string()),
                    },
                    Err(e) => MetricOutcome::Skipped(format!("pull request count failed: {}", e)),
                }
            }
        }
    }

    pub async fn top_by_stars(&self, organization: &str, n: i64) -> Result<Ranking> {
        self.rank(organization, n, MetricKind::Stars).await
    }

    pub async fn top_by_forks(&self, organization: &str, n: i64) -> Result<Ranking> {
        self.rank(organization, n, MetricKind::Forks).await
    }

    pub async fn top_by_pull_requests(&self, organization: &str, n: i64) -> Result<Ranking> {
        self.rank(organization, n, MetricKind::PullRequests).await
    }

    pub async fn top_by_contribution_percentage(
        &self,
        organization: &str,
        n: i64,
    ) -> Result<Ranking> {
        self.rank(organization, n, MetricKind::ContributionPercentage).await
    }
}

fn count_field(value: std::result::Result<u64, String>) -> MetricOutcome {
    match value {
        Ok(n) => MetricOutcome::Computed(Metric::Count(n)),
        Err(reason) => MetricOutcome::Skipped(reason),
    }
}
