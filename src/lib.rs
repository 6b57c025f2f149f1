//! Rank a GitHub organization's repositories by stars, forks, pull request
//! count or contribution percentage.
//!
//! The pipeline is [`github::GitHubClient::fetch_all`] for the listing,
//! [`github::GitHubClient::estimate_total`] for per-repository pull request
//! counts, and [`top_n::TopN`] for bounded selection, tied together by
//! [`ranking::Ranker`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod pagination;
pub mod ranking;
pub mod top_n;
pub mod types;

pub use error::{RankerError, Result};
pub use models::{Candidate, Metric, MetricKind, Ranking};
pub use ranking::Ranker;
