//! Scripted Tally GraphQL endpoint
//!
//! Serves proposals and votes from memory and records every request it
//! receives, so tests can assert on what the pipeline sent upstream.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Status returned for proposals registered with [`FakeTally::failing_votes`]
pub const FAILING_VOTES_STATUS: StatusCode = StatusCode::SERVICE_UNAVAILABLE;

/// One request as seen by the fake
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Debug, Default)]
struct FakeData {
    proposals: Vec<Value>,
    votes: HashMap<String, Vec<Value>>,
    failing: Vec<String>,
    rate_limited: u32,
    requests: Vec<RecordedRequest>,
}

/// Builder and handle of the scripted endpoint
#[derive(Debug, Clone, Default)]
pub struct FakeTally {
    data: Arc<Mutex<FakeData>>,
}

impl FakeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a proposal with the votes cast on it as `(voter, RFC 3339 timestamp)`
    #[must_use]
    pub fn proposal(self, id: &str, votes: &[(&str, &str)]) -> Self {
        {
            let mut data = self.data.lock();
            data.proposals.push(json!({
                "id": id,
                "governor": { "id": "eip155:8453:0xGov", "name": "Test DAO" },
                "createdAt": "2024-01-01T00:00:00Z",
            }));
            let nodes = votes
                .iter()
                .map(|(voter, timestamp)| {
                    json!({
                        "voter": { "address": voter },
                        "block": { "timestamp": timestamp },
                    })
                })
                .collect();
            data.votes.insert(id.to_string(), nodes);
        }
        self
    }

    /// Answer vote queries for `id` with [`FAILING_VOTES_STATUS`]
    #[must_use]
    pub fn failing_votes(self, id: &str) -> Self {
        self.data.lock().failing.push(id.to_string());
        self
    }

    /// Answer the next `count` requests with 429
    #[must_use]
    pub fn rate_limited(self, count: u32) -> Self {
        self.data.lock().rate_limited = count;
        self
    }

    /// Snapshot of every request received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.data.lock().requests.clone()
    }

    /// Serve on an ephemeral local port
    pub async fn start(self) -> Result<RunningFakeTally> {
        let app = Router::new()
            .route("/query", post(handle_query))
            .with_state(self.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(RunningFakeTally {
            addr,
            fake: self,
            _handle: handle,
        })
    }
}

/// A started [`FakeTally`]
pub struct RunningFakeTally {
    pub addr: SocketAddr,
    pub fake: FakeTally,
    _handle: JoinHandle<()>,
}

impl RunningFakeTally {
    /// URL to configure as `TALLY_API_URL`
    pub fn url(&self) -> String {
        format!("http://{}/query", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.fake.requests()
    }

    /// Number of vote queries received
    pub fn vote_requests(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| proposal_filter(&r.body).is_some())
            .count()
    }
}

fn proposal_filter(body: &Value) -> Option<&str> {
    body.pointer("/variables/input/filters/proposalId")
        .and_then(Value::as_str)
}

async fn handle_query(
    State(fake): State<FakeTally>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let api_key = headers
        .get("Api-Key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.answer(api_key, body)
}

impl FakeTally {
    fn answer(&self, api_key: Option<String>, body: Value) -> Response {
        let mut data = self.data.lock();
        data.requests.push(RecordedRequest {
            api_key,
            body: body.clone(),
        });

        if data.rate_limited > 0 {
            data.rate_limited -= 1;
            return (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response();
        }

        match proposal_filter(&body) {
            Some(id) if data.failing.iter().any(|f| f == id) => {
                (FAILING_VOTES_STATUS, "votes backend unavailable").into_response()
            }
            Some(id) => {
                let nodes = data.votes.get(id).cloned().unwrap_or_default();
                Json(json!({ "data": { "votes": { "nodes": nodes } } })).into_response()
            }
            None => {
                let nodes = data.proposals.clone();
                Json(json!({ "data": { "proposals": { "nodes": nodes } } })).into_response()
            }
        }
    }
}
