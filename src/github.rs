use crate::cache::ResponseCache;
use crate::config::Settings;
use crate::error::{RankerError, Result};
use crate::pagination::{page_number, PageLinks};
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = "org-repo-ranker/0.1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One page of a paginated listing.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub links: PageLinks,
}

#[derive(Debug)]
pub struct GitHubClient {
    client: Client,
    token: String,
    settings: Settings,
    cache: ResponseCache,
}

impl GitHubClient {
    /// Build a client from loaded settings. `token` overrides `API_TOKEN`.
    pub fn new(settings: Settings, token: Option<String>) -> Result<Self> {
        let token = settings.resolve_token(token)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let cache = ResponseCache::new(&settings.cache);

        Ok(GitHubClient {
            client,
            token,
            settings,
            cache,
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn repos_url(&self, organization: &str) -> String {
        format!("{}{}/repos", self.settings.base_url, organization)
    }

    pub fn pulls_url(&self, organization: &str, repo_name: &str) -> String {
        format!("{}{}/{}/pulls?state=all", self.settings.repo_url, organization, repo_name)
    }

    /// Single GET, served from the cache when a fresh entry exists.
    /// Returns the body and the raw `Link` header.
    async fn make_request(&self, url: &str) -> Result<(String, Option<String>)> {
        if let Some(hit) = self.cache.get(url) {
            return Ok((hit.body, hit.link));
        }

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(AUTHORIZATION, format!("token {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RankerError::HttpError {
                status,
                url: url.to_string(),
            });
        }

        let link = response
            .headers()
            .get(LINK)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        self.cache.put(url, body.clone(), link.clone());
        Ok((body, link))
    }

    /// Fetch and decode one page of a JSON array listing.
    pub async fn fetch_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        let (body, link) = self.make_request(url).await?;

        let items: Vec<T> = serde_json::from_str(&body).map_err(|e| {
            RankerError::ImproperlyFormattedData(format!(
                "Unexpected response body from {}: {}",
                url, e
            ))
        })?;
        let links = link.as_deref().map(PageLinks::parse).unwrap_or_default();

        debug!(url, items = items.len(), has_next = links.next.is_some(), "Fetched page");
        Ok(Page { items, links })
    }

    /// Collect every page of the organization's repository listing, in page
    /// order. `start_url` replaces the URL built from `BASE_URL`. Any failed
    /// page discards everything collected so far, and so does a `next` link
    /// back to a page already fetched.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        organization: &str,
        start_url: Option<&str>,
    ) -> Result<Vec<T>> {
        if organization.trim().is_empty() {
            return Err(RankerError::InvalidArgument(
                "No organization name specified".to_string(),
            ));
        }

        info!("Fetching data about all repositories for {}", organization);

        let mut url = start_url
            .map(str::to_string)
            .unwrap_or_else(|| self.repos_url(organization));
        let mut items = Vec::new();
        let mut visited = HashSet::new();

        loop {
            let page = self.fetch_page::<T>(&url).await?;
            items.extend(page.items);
            visited.insert(url);

            match page.links.next {
                Some(next) if visited.contains(&next) => {
                    return Err(RankerError::ImproperlyFormattedData(format!(
                        "Next page link points back at {}",
                        next
                    )));
                }
                Some(next) => url = next,
                None => break,
            }
        }

        let pages = visited.len();

        info!(organization, pages, total = items.len(), "Done fetching repositories");
        Ok(items)
    }

    /// Count a repository's pull requests (all states) with at most two
    /// requests: the first page and the page named by the `last` relation.
    pub async fn estimate_total(&self, organization: &str, repo_name: &str) -> Result<u64> {
        if organization.trim().is_empty() || repo_name.trim().is_empty() {
            return Err(RankerError::InvalidArgument(
                "Organization and repository name are required".to_string(),
            ));
        }
        self.estimate_total_from(&self.pulls_url(organization, repo_name)).await
    }

    /// Same as [`estimate_total`](Self::estimate_total) starting at an
    /// arbitrary first-page URL.
    ///
    /// Assumes every page before the last holds as many items as the first.
    pub async fn estimate_total_from(&self, first_url: &str) -> Result<u64> {
        let first = self.fetch_page::<IgnoredAny>(first_url).await?;
        let page_size = first.items.len() as u64;

        if page_size == 0 {
            return Ok(0);
        }

        let Some(last_url) = first.links.last else {
            return Ok(page_size);
        };

        let total_pages = page_number(&last_url)?;
        if total_pages <= 1 {
            return Ok(page_size);
        }

        let last = self.fetch_page::<IgnoredAny>(&last_url).await?;
        let total = page_size * (total_pages - 1) + last.items.len() as u64;

        debug!(first_url, page_size, total_pages, total, "Estimated item count");
        Ok(total)
    }
}
