//! GraphQL documents and response envelopes for the Tally API

use chrono::{DateTime, Utc};
use leaderboard_core::{Proposal, Vote};
use serde::Deserialize;
use serde_json::{json, Value};

pub const PROPOSALS_QUERY: &str = r"
  query Proposals($input: ProposalsInput!) {
    proposals(input: $input) {
      nodes {
        ... on Proposal {
          id
          governor {
            id
            name
          }
          createdAt
        }
      }
    }
  }
";

pub const VOTES_QUERY: &str = r"
  query Votes($input: VotesInput!) {
    votes(input: $input) {
      nodes {
        ... on OnchainVote {
          id
          voter {
            address
          }
          type
          amount
          block {
            timestamp
          }
        }
      }
    }
  }
";

/// Request body for the most recent `limit` proposals of a governor
pub fn proposals_request(governor_id: &str, limit: u32) -> Value {
    json!({
        "query": PROPOSALS_QUERY,
        "variables": {
            "input": {
                "filters": { "governorId": governor_id },
                "page": { "limit": limit },
            },
        },
    })
}

/// Request body for every vote cast on one proposal
pub fn votes_request(proposal_id: &str) -> Value {
    json!({
        "query": VOTES_QUERY,
        "variables": {
            "input": {
                "filters": { "proposalId": proposal_id },
            },
        },
    })
}

/// Standard GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphqlEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl<T> GraphqlEnvelope<T> {
    /// Message of the first query-level error, if any
    pub fn first_error(&self) -> Option<&str> {
        self.errors
            .as_deref()
            .and_then(<[GraphqlError]>::first)
            .map(|e| e.message.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    #[serde(default)]
    pub message: String,
}

/// `nodes` may be null, which is read as empty
#[derive(Debug, Deserialize)]
pub struct NodeList<T> {
    pub nodes: Option<Vec<T>>,
}

impl<T> NodeList<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.nodes.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProposalsData {
    pub proposals: Option<NodeList<ProposalNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalNode {
    pub id: String,
    pub governor: GovernorRef,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct GovernorRef {
    pub id: String,
}

impl From<ProposalNode> for Proposal {
    fn from(node: ProposalNode) -> Self {
        Proposal::new(node.id, node.governor.id, node.created_at)
    }
}

#[derive(Debug, Deserialize)]
pub struct VotesData {
    pub votes: Option<NodeList<VoteNode>>,
}

#[derive(Debug, Deserialize)]
pub struct VoteNode {
    pub voter: VoterRef,
    pub block: BlockRef,
}

#[derive(Debug, Deserialize)]
pub struct VoterRef {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct BlockRef {
    pub timestamp: DateTime<Utc>,
}

impl VoteNode {
    /// Attach the proposal id the vote was queried for
    pub fn into_vote(self, proposal_id: &str) -> Vote {
        Vote::new(proposal_id, self.voter.address, self.block.timestamp)
    }
}
