#![allow(dead_code)]

use mockito::{Mock, ServerGuard};
use org_repo_ranker::config::{CacheBackend, CacheSettings, Settings};
use org_repo_ranker::github::GitHubClient;
use org_repo_ranker::Ranker;
use serde_json::{json, Value};

pub const ORG: &str = "acme";

/// Settings whose base URLs point at the mock server, cache off.
pub fn settings_for(server: &ServerGuard) -> Settings {
    Settings {
        base_url: format!("{}/orgs/", server.url()),
        repo_url: format!("{}/repos/", server.url()),
        api_token: Some("test_token".to_string()),
        cache: CacheSettings {
            backend: CacheBackend::None,
            expire_after_secs: 0,
        },
    }
}

pub fn client_for(server: &ServerGuard) -> GitHubClient {
    GitHubClient::new(settings_for(server), None).expect("Failed to create client")
}

pub fn ranker_for(server: &ServerGuard) -> Ranker {
    Ranker::new(client_for(server))
}

pub fn repo(name: &str, id: u64, stars: u64, forks: u64) -> Value {
    json!({
        "name": name,
        "id": id,
        "full_name": format!("{}/{}", ORG, name),
        "stargazers_count": stars,
        "forks_count": forks,
    })
}

/// JSON array with `count` pull request stubs.
pub fn pulls_body(count: usize) -> String {
    Value::Array(
        (0..count)
            .map(|n| json!({ "number": n + 1, "state": "open" }))
            .collect(),
    )
    .to_string()
}

pub fn link(server: &ServerGuard, entries: &[(&str, &str)]) -> String {
    entries
        .iter()
        .map(|(path, rel)| format!("<{}{}>; rel=\"{}\"", server.url(), path, rel))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Serve the organization listing as one page.
pub async fn mock_listing(server: &mut ServerGuard, repos: &[Value]) -> Mock {
    server
        .mock("GET", format!("/orgs/{}/repos", ORG).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(Value::Array(repos.to_vec()).to_string())
        .create_async()
        .await
}

/// Serve a repository's pull requests on a single page.
pub async fn mock_pulls(server: &mut ServerGuard, repo: &str, count: usize) -> Mock {
    server
        .mock("GET", format!("/repos/{}/{}/pulls?state=all", ORG, repo).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pulls_body(count))
        .create_async()
        .await
}

/// Serve a repository's pull requests as `pages` pages of `page_size`, the
/// last holding `last_count`. Intermediate pages must never be requested.
pub async fn mock_paged_pulls(
    server: &mut ServerGuard,
    repo: &str,
    page_size: usize,
    pages: u64,
    last_count: usize,
) -> Vec<Mock> {
    let first_path = format!("/repos/{}/{}/pulls?state=all", ORG, repo);
    let page_path = |page: u64| format!("/repos/{}/{}/pulls?state=all&page={}", ORG, repo, page);
    let header = link(
        server,
        &[(page_path(2).as_str(), "next"), (page_path(pages).as_str(), "last")],
    );

    let mut mocks = vec![
        server
            .mock("GET", first_path.as_str())
            .with_status(200)
            .with_header("link", &header)
            .with_body(pulls_body(page_size))
            .expect(1)
            .create_async()
            .await,
        server
            .mock("GET", page_path(pages).as_str())
            .with_status(200)
            .with_body(pulls_body(last_count))
            .expect(1)
            .create_async()
            .await,
    ];
    for page in 2..pages {
        mocks.push(
            server
                .mock("GET", page_path(page).as_str())
                .with_status(200)
                .with_body(pulls_body(page_size))
                .expect(0)
                .create_async()
                .await,
        );
    }
    mocks
}
