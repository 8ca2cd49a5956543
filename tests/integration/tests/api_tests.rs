//! API Integration Tests
//!
//! Each test starts the server on an ephemeral port against a scripted Tally
//! endpoint. Storage is in process memory and name resolution is disabled,
//! so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, FakeTally, TestServer, FAILING_VOTES_STATUS, TEST_TALLY_KEY,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn two_proposal_dao() -> FakeTally {
    FakeTally::new()
        .proposal(
            "P1",
            &[
                ("0xA1", "2024-01-01T10:00:00Z"),
                ("0xA2", "2024-01-02T10:00:00Z"),
            ],
        )
        .proposal("P2", &[("0xA1", "2024-02-01T10:00:00Z")])
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let tally = FakeTally::new().start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    let response = server.get("/health").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_health_requires_token() {
    let tally = FakeTally::new().start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    let response = server.get_anonymous("/health").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let tally = FakeTally::new().start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Leaderboard Tests
// ============================================================================

#[tokio::test]
async fn test_get_leaderboard_refreshes_on_miss_then_serves_cache() {
    let tally = two_proposal_dao().start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    let response = server.get("/get-leaderboard").await.unwrap();
    let first: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(first["success"], true);
    assert_eq!(first["cached"], false);
    assert_eq!(first["totalProposals"], 2);
    assert_eq!(first["proposalsFetched"], 2);

    let voters = first["voterData"].as_array().unwrap();
    assert_eq!(voters.len(), 2);
    assert_eq!(voters[0]["address"], "0xA1");
    assert_eq!(voters[0]["proposals_voted"], 2);
    assert_eq!(voters[0]["participation_rate"], 100.0);
    assert_eq!(voters[0]["first_vote"], "1/1/2024");
    assert_eq!(voters[0]["last_vote"], "2/1/2024");
    assert_eq!(voters[1]["address"], "0xA2");
    assert_eq!(voters[1]["participation_rate"], 50.0);

    let upstream_calls = tally.requests().len();
    assert_eq!(upstream_calls, 3);
    assert!(tally
        .requests()
        .iter()
        .all(|r| r.api_key.as_deref() == Some(TEST_TALLY_KEY)));

    let response = server.get("/get-leaderboard").await.unwrap();
    let second: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(second["cached"], true);
    assert_eq!(second["voterData"], first["voterData"]);
    assert_eq!(second["lastUpdated"], first["lastUpdated"]);
    assert_eq!(tally.requests().len(), upstream_calls);
}

#[tokio::test]
async fn test_refresh_skips_failed_vote_fetch() {
    let tally = two_proposal_dao()
        .proposal("P3", &[("0xA3", "2024-03-01T10:00:00Z")])
        .failing_votes("P3")
        .start()
        .await
        .unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    let response = server.post("/refresh-leaderboard", &json!({})).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Leaderboard data refreshed successfully");
    assert_eq!(body["data"]["totalProposals"], 3);

    let voters = body["data"]["voterData"].as_array().unwrap();
    assert_eq!(voters.len(), 2);
    assert!(voters.iter().all(|v| v["address"] != "0xA3"));
    // Participation is measured against every fetched proposal
    assert!((voters[0]["participation_rate"].as_f64().unwrap() - 200.0 / 3.0).abs() < 1e-9);

    let skipped = body["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["stage"], "votes");
    assert_eq!(skipped[0]["item"], "P3");
    assert!(skipped[0]["reason"]
        .as_str()
        .unwrap()
        .contains(FAILING_VOTES_STATUS.as_str()));
}

#[tokio::test]
async fn test_refresh_replaces_cached_snapshot() {
    let tally = two_proposal_dao().start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    server.get("/get-leaderboard").await.unwrap();
    let response = server.post("/refresh-leaderboard", &json!({})).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    assert_eq!(tally.vote_requests(), 4);

    let response = server.get("/get-leaderboard").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["cached"], true);
}

#[tokio::test]
async fn test_refresh_retries_after_rate_limit() {
    let tally = two_proposal_dao().rate_limited(2).start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    let response = server.post("/refresh-leaderboard", &json!({})).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["data"]["totalProposals"], 2);
    assert!(body["skipped"].as_array().unwrap().is_empty());
    // Two throttled proposal queries, then one proposal and two vote queries
    assert_eq!(tally.requests().len(), 5);
}

#[tokio::test]
async fn test_refresh_fails_when_proposals_are_throttled() {
    let tally = two_proposal_dao().rate_limited(3).start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    let response = server.post("/refresh-leaderboard", &json!({})).await.unwrap();
    let body: Value = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();

    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "MAX_RETRIES_EXCEEDED");

    // Nothing was persisted, the next read runs the pipeline again
    let response = server.get("/get-leaderboard").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["cached"], false);
}

#[tokio::test]
async fn test_refresh_fails_without_proposals() {
    let tally = FakeTally::new().start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    let response = server.post("/refresh-leaderboard", &json!({})).await.unwrap();
    let body: Value = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();

    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No proposals found");
}

#[tokio::test]
async fn test_export_leaderboard_csv() {
    let tally = two_proposal_dao().start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();

    let response = server.get("/export-leaderboard").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/csv");

    let csv = response.text().await.unwrap();
    assert_eq!(
        csv,
        "address,ens_name,proposals_voted,participation_rate,first_vote,last_vote\n\
         0xA1,,2,100.00,1/1/2024,2/1/2024\n\
         0xA2,,1,50.00,1/2/2024,1/2/2024"
    );
}

// ============================================================================
// Tally Proxy Tests
// ============================================================================

#[tokio::test]
async fn test_proxy_proposals_passes_body_through() {
    let tally = two_proposal_dao().start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();
    let query = json!({ "query": "{ proposals { nodes { id } } }", "variables": {} });

    let response = server.post("/tally/proposals", &query).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let nodes = body["data"]["proposals"]["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);

    let requests = tally.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, query);
    assert_eq!(requests[0].api_key.as_deref(), Some(TEST_TALLY_KEY));
}

#[tokio::test]
async fn test_proxy_votes_forwards_upstream_status() {
    let tally = two_proposal_dao().failing_votes("P1").start().await.unwrap();
    let server = TestServer::start(&tally.url()).await.unwrap();
    let query = json!({
        "query": "{ votes { nodes { id } } }",
        "variables": { "input": { "filters": { "proposalId": "P1" } } },
    });

    let response = server.post("/tally/votes", &query).await.unwrap();
    let body: Value = assert_json(response, FAILING_VOTES_STATUS).await.unwrap();

    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Tally API error: 503");
    assert_eq!(body["details"], "votes backend unavailable");
}
