//! Test doubles shared by the unit tests of this crate

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::Value;

use crate::pacing::Clock;
use crate::services::{ServiceError, ServiceResult};
use crate::transport::{JsonTransport, UpstreamResponse};

/// Clock that records requested sleeps and returns immediately
#[derive(Debug, Default)]
pub struct RecordingClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

#[async_trait]
impl Clock for RecordingClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }
}

/// One scripted transport outcome
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    Json(Value),
    TransportFailure,
}

impl Reply {
    fn into_result(self) -> ServiceResult<UpstreamResponse> {
        match self {
            Self::Status(status, body) => Ok(UpstreamResponse::new(status, body)),
            Self::Json(value) => Ok(UpstreamResponse::new(200, value.to_string())),
            Self::TransportFailure => Err(ServiceError::Transport("connection refused".to_string())),
        }
    }
}

/// Transport that replays a fixed reply sequence and records request bodies
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl JsonTransport for ScriptedTransport {
    async fn post(&self, body: &Value) -> ServiceResult<UpstreamResponse> {
        self.requests.lock().push(body.clone());
        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Reply::Status(500, "script exhausted".to_string()));
        reply.into_result()
    }
}

/// Transport that answers from a closure over the request body
pub struct FnTransport<F>(pub F);

#[async_trait]
impl<F> JsonTransport for FnTransport<F>
where
    F: Fn(&Value) -> Reply + Send + Sync,
{
    async fn post(&self, body: &Value) -> ServiceResult<UpstreamResponse> {
        (self.0)(body).into_result()
    }
}
