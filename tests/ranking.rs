mod common;

use common::*;
use org_repo_ranker::error::RankerError;
use org_repo_ranker::models::{Candidate, Metric, MetricKind};
use serde_json::json;

fn summary(results: &[Candidate]) -> Vec<(String, String, u64)> {
    results
        .iter()
        .map(|c| (c.metric.to_string(), c.name.clone(), c.id))
        .collect()
}

fn is_descending(results: &[Candidate]) -> bool {
    results.windows(2).all(|w| w[0].metric >= w[1].metric)
}

#[tokio::test]
async fn test_top_two_by_stars() {
    let mut server = mockito::Server::new_async().await;
    let repos = [repo("a", 11, 5, 0), repo("b", 22, 9, 0), repo("c", 33, 3, 0)];
    let _m = mock_listing(&mut server, &repos).await;

    let ranker = ranker_for(&server);
    let ranking = ranker.top_by_stars(ORG, 2).await.unwrap();

    assert_eq!(
        ranking.results,
        vec![
            Candidate::new(Metric::Count(9), "b", 22),
            Candidate::new(Metric::Count(5), "a", 11),
        ]
    );
    assert!(ranking.skipped.is_empty());
}

#[tokio::test]
async fn test_result_length_is_min_of_n_and_repos() {
    let mut server = mockito::Server::new_async().await;
    let repos = vec![
        repo("a", 1, 4, 10),
        repo("b", 2, 8, 3),
        repo("c", 3, 4, 7),
        repo("d", 4, 1, 1),
        repo("e", 5, 15, 0),
    ];
    let _m = mock_listing(&mut server, &repos).await;

    let ranker = ranker_for(&server);
    for n in 0..=7i64 {
        for kind in [MetricKind::Stars, MetricKind::Forks] {
            let ranking = ranker.rank(ORG, n, kind).await.unwrap();
            assert_eq!(
                ranking.results.len(),
                (n as usize).min(repos.len()),
                "n={} kind={}",
                n,
                kind
            );
            assert!(is_descending(&ranking.results));
        }
    }
}

#[tokio::test]
async fn test_zero_is_empty_success() {
    let mut server = mockito::Server::new_async().await;
    let _m = mock_listing(&mut server, &[repo("a", 1, 5, 0)]).await;

    let ranking = ranker_for(&server).rank(ORG, 0, MetricKind::Stars).await.unwrap();
    assert!(ranking.results.is_empty());
}

#[tokio::test]
async fn test_invalid_arguments_make_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", mockito::Matcher::Any).expect(0).create_async().await;
    let ranker = ranker_for(&server);

    let negative = ranker.rank(ORG, -1, MetricKind::Forks).await;
    assert!(matches!(negative, Err(RankerError::InvalidArgument(_))));

    let empty_org = ranker.rank("", 3, MetricKind::Stars).await;
    assert!(matches!(empty_org, Err(RankerError::InvalidArgument(_))));

    assert!(matches!(
        "commit_count".parse::<MetricKind>(),
        Err(RankerError::InvalidArgument(_))
    ));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_organization_yields_no_result() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/orgs/acme/repos")
        .with_status(404)
        .create_async()
        .await;

    let result = ranker_for(&server).rank(ORG, 10, MetricKind::Forks).await;
    assert!(matches!(result, Err(RankerError::HttpError { .. })));
}

#[tokio::test]
async fn test_organization_without_repositories() {
    let mut server = mockito::Server::new_async().await;
    let _m = mock_listing(&mut server, &[]).await;

    let result = ranker_for(&server).rank(ORG, 10, MetricKind::Stars).await;
    assert!(matches!(result, Err(RankerError::NoRepositories(_))));
}

#[tokio::test]
async fn test_bad_records_are_skipped_not_fatal() {
    let mut server = mockito::Server::new_async().await;
    let _m = mock_listing(
        &mut server,
        &[
            repo("good", 1, 12, 0),
            json!({ "name": "no-stars", "id": 2, "forks_count": 1 }),
            json!({ "id": 3, "stargazers_count": 50 }),
            json!({ "name": "weird", "id": 4, "stargazers_count": "lots" }),
            repo("also-good", 5, 30, 0),
        ],
    )
    .await;

    let ranking = ranker_for(&server).rank(ORG, 10, MetricKind::Stars).await.unwrap();

    assert_eq!(
        summary(&ranking.results),
        vec![
            ("30".to_string(), "also-good".to_string(), 5),
            ("12".to_string(), "good".to_string(), 1),
        ]
    );
    let skipped: Vec<&str> = ranking.skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skipped, vec!["no-stars", "<unnamed>", "weird"]);
}

#[tokio::test]
async fn test_bad_star_count_does_not_block_forks_ranking() {
    let mut server = mockito::Server::new_async().await;
    let _m = mock_listing(
        &mut server,
        &[
            repo("plain", 1, 3, 5),
            json!({ "name": "weird", "id": 4, "stargazers_count": "lots", "forks_count": 40 }),
        ],
    )
    .await;

    let ranking = ranker_for(&server).rank(ORG, 2, MetricKind::Forks).await.unwrap();

    assert_eq!(
        summary(&ranking.results),
        vec![
            ("40".to_string(), "weird".to_string(), 4),
            ("5".to_string(), "plain".to_string(), 1),
        ]
    );
    assert!(ranking.skipped.is_empty());
}

#[tokio::test]
async fn test_pull_request_ranking() {
    let mut server = mockito::Server::new_async().await;
    let repos = [repo("small", 1, 0, 0), repo("big", 2, 0, 0), repo("mid", 3, 0, 0)];
    let _m = mock_listing(&mut server, &repos).await;
    let _m = mock_pulls(&mut server, "small", 2).await;
    let _m = mock_paged_pulls(&mut server, "big", 30, 4, 7).await;
    let _m = mock_pulls(&mut server, "mid", 25).await;

    let ranking = ranker_for(&server).top_by_pull_requests(ORG, 2).await.unwrap();

    assert_eq!(
        summary(&ranking.results),
        vec![
            ("97".to_string(), "big".to_string(), 2),
            ("25".to_string(), "mid".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn test_failed_pull_request_count_skips_one_repo() {
    let mut server = mockito::Server::new_async().await;
    let _m = mock_listing(&mut server, &[repo("broken", 1, 0, 0), repo("fine", 2, 0, 0)]).await;
    let _m = server
        .mock("GET", "/repos/acme/broken/pulls?state=all")
        .with_status(500)
        .create_async()
        .await;
    let _m = mock_pulls(&mut server, "fine", 4).await;

    let ranking = ranker_for(&server).rank(ORG, 5, MetricKind::PullRequests).await.unwrap();

    assert_eq!(summary(&ranking.results), vec![("4".to_string(), "fine".to_string(), 2)]);
    assert_eq!(ranking.skipped.len(), 1);
    assert_eq!(ranking.skipped[0].name, "broken");
}

#[tokio::test]
async fn test_contribution_percentage() {
    let mut server = mockito::Server::new_async().await;
    let _m = mock_listing(
        &mut server,
        &[repo("third", 1, 0, 3), repo("forkless", 2, 0, 0), repo("half", 3, 0, 2)],
    )
    .await;
    let _m = mock_pulls(&mut server, "third", 1).await;
    let forkless = server
        .mock("GET", "/repos/acme/forkless/pulls?state=all")
        .with_status(200)
        .with_body(pulls_body(50))
        .expect(0)
        .create_async()
        .await;
    let _m = mock_pulls(&mut server, "half", 5).await;

    let ranking = ranker_for(&server).top_by_contribution_percentage(ORG, 10).await.unwrap();

    assert_eq!(
        summary(&ranking.results),
        vec![
            ("2.5".to_string(), "half".to_string(), 3),
            ("0.33".to_string(), "third".to_string(), 1),
        ]
    );
    assert_eq!(ranking.skipped.len(), 1);
    assert_eq!(ranking.skipped[0].name, "forkless");
    forkless.assert_async().await;
}

#[tokio::test]
async fn test_ranking_is_repeatable() {
    let mut server = mockito::Server::new_async().await;
    let _m = mock_listing(
        &mut server,
        &[repo("x", 1, 7, 1), repo("y", 2, 7, 2), repo("z", 3, 7, 3), repo("w", 4, 2, 4)],
    )
    .await;

    let ranker = ranker_for(&server);
    let first = ranker.top_by_stars(ORG, 2).await.unwrap();
    let second = ranker.top_by_stars(ORG, 2).await.unwrap();

    assert_eq!(first.results, second.results);
    assert!(is_descending(&first.results));
    assert!(first.results.iter().all(|c| c.metric == Metric::Count(7)));
}

#[tokio::test]
async fn test_forks_ranking_with_start_url() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/mirror/repos")
        .with_status(200)
        .with_body(json!([repo("p", 1, 0, 3), repo("q", 2, 0, 8)]).to_string())
        .create_async()
        .await;

    let start = format!("{}/mirror/repos", server.url());
    let ranking = ranker_for(&server)
        .rank_from(ORG, 1, MetricKind::Forks, Some(&start))
        .await
        .unwrap();

    assert_eq!(summary(&ranking.results), vec![("8".to_string(), "q".to_string(), 2)]);
}
