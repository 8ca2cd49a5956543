//! Tally API client: proposal and vote fetchers plus the raw proxy call

use std::sync::Arc;
use std::time::Duration;

use leaderboard_common::TallyConfig;
use leaderboard_core::{Proposal, Vote};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::queries::{proposals_request, votes_request, GraphqlEnvelope, ProposalsData, VotesData};
use super::retry::{RetryPolicy, RetryingClient};
use crate::pacing::Clock;
use crate::services::{ServiceError, ServiceResult};
use crate::transport::{HttpTransport, JsonTransport, UpstreamResponse};

/// Client for the Tally GraphQL API.
///
/// Without an API key the client still exists, but every call fails with a
/// configuration error.
#[derive(Clone)]
pub struct TallyClient {
    http: Option<RetryingClient>,
    governor_id: String,
    proposal_limit: u32,
    vote_fetch_interval: Duration,
}

impl TallyClient {
    /// Build a client over an explicit transport; `None` means no API key
    pub fn new(
        config: &TallyConfig,
        transport: Option<Arc<dyn JsonTransport>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let policy = RetryPolicy::from(config);
        Self {
            http: transport.map(|transport| RetryingClient::new(transport, clock, policy)),
            governor_id: config.governor_id.clone(),
            proposal_limit: config.proposal_limit,
            vote_fetch_interval: config.vote_fetch_interval(),
        }
    }

    /// Build a client backed by `reqwest`
    pub fn from_config(config: &TallyConfig, clock: Arc<dyn Clock>) -> ServiceResult<Self> {
        let transport = match config.api_key.as_deref() {
            Some(key) => {
                let transport = HttpTransport::tally(&config.api_url, key, config.http_timeout())?;
                Some(Arc::new(transport) as Arc<dyn JsonTransport>)
            }
            None => {
                warn!("TALLY_API_KEY not set, refreshes and proxy calls will fail");
                None
            }
        };
        Ok(Self::new(config, transport, clock))
    }

    /// Check whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.http.is_some()
    }

    /// Pause enforced before each vote fetch after the first
    pub fn vote_fetch_interval(&self) -> Duration {
        self.vote_fetch_interval
    }

    fn http(&self, missing: &str) -> ServiceResult<&RetryingClient> {
        self.http
            .as_ref()
            .ok_or_else(|| ServiceError::configuration(missing))
    }

    /// Most recent proposals of the configured governor.
    ///
    /// An empty result is an error; a run over zero proposals is not usable.
    #[instrument(skip(self), fields(governor_id = %self.governor_id))]
    pub async fn fetch_proposals(&self) -> ServiceResult<Vec<Proposal>> {
        let http = self.http("Tally API key not configured")?;
        let response = http
            .send(&proposals_request(&self.governor_id, self.proposal_limit))
            .await?;

        if !response.is_success() {
            return Err(ServiceError::upstream(format!(
                "Failed to fetch proposals: {} - {}",
                response.status, response.body
            )));
        }

        let envelope: GraphqlEnvelope<ProposalsData> = response
            .json()
            .map_err(|e| ServiceError::upstream(format!("Invalid proposals response: {e}")))?;

        if let Some(message) = envelope.first_error() {
            return Err(ServiceError::upstream(format!("GraphQL Error: {message}")));
        }

        let proposals: Vec<Proposal> = envelope
            .data
            .and_then(|data| data.proposals)
            .map(|list| list.into_nodes())
            .unwrap_or_default()
            .into_iter()
            .map(Proposal::from)
            .collect();

        if proposals.is_empty() {
            return Err(ServiceError::upstream("No proposals found"));
        }

        debug!(count = proposals.len(), "Fetched proposals");
        Ok(proposals)
    }

    /// Every vote cast on `proposal_id`; an empty or null node list is valid
    #[instrument(skip(self))]
    pub async fn fetch_votes(&self, proposal_id: &str) -> ServiceResult<Vec<Vote>> {
        let http = self.http("Tally API key not configured")?;
        let response = http.send(&votes_request(proposal_id)).await?;

        if !response.is_success() {
            return Err(ServiceError::upstream(format!(
                "Failed to fetch votes for proposal {proposal_id}: {} - {}",
                response.status, response.body
            )));
        }

        let envelope: GraphqlEnvelope<VotesData> = response.json().map_err(|e| {
            ServiceError::upstream(format!("Invalid votes response for proposal {proposal_id}: {e}"))
        })?;

        if let Some(message) = envelope.first_error() {
            return Err(ServiceError::upstream(format!(
                "GraphQL Error for proposal {proposal_id}: {message}"
            )));
        }

        let votes: Vec<Vote> = envelope
            .data
            .and_then(|data| data.votes)
            .map(|list| list.into_nodes())
            .unwrap_or_default()
            .into_iter()
            .map(|node| node.into_vote(proposal_id))
            .collect();

        debug!(votes = votes.len(), "Fetched votes");
        Ok(votes)
    }

    /// Forward a caller-supplied GraphQL body through the retry policy.
    ///
    /// The upstream response is returned untouched, whatever its status.
    pub async fn forward(&self, body: &Value) -> ServiceResult<UpstreamResponse> {
        let http = self.http("API key not configured")?;
        http.send(body).await
    }
}

impl std::fmt::Debug for TallyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TallyClient")
            .field("configured", &self.is_configured())
            .field("governor_id", &self.governor_id)
            .field("proposal_limit", &self.proposal_limit)
            .finish()
    }
}
