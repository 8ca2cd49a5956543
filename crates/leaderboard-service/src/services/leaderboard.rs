//! Leaderboard service - the full-refresh pipeline and cached reads

use leaderboard_core::{LeaderboardSnapshot, VoterAggregator, LEADERBOARD_CACHE_KEY};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::report::{RefreshReport, SkippedItem};
use crate::pacing::Pacer;

/// Snapshot returned by a read, with where it came from
#[derive(Debug, Clone)]
pub struct LeaderboardRead {
    pub snapshot: LeaderboardSnapshot,
    /// `false` when the read had to run the pipeline
    pub cached: bool,
}

/// Leaderboard service for refreshing and reading the snapshot
#[derive(Clone)]
pub struct LeaderboardService {
    ctx: ServiceContext,
}

impl LeaderboardService {
    /// Create a new LeaderboardService
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run fetch, aggregate, resolve and persist once.
    ///
    /// Concurrent runs are not coordinated; the last one to persist wins.
    pub async fn run_full_refresh(&self) -> ServiceResult<RefreshReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("leaderboard_refresh", %run_id);
        self.refresh(run_id).instrument(span).await
    }

    async fn refresh(&self, run_id: Uuid) -> ServiceResult<RefreshReport> {
        let tally = self.ctx.tally();
        if !tally.is_configured() {
            return Err(ServiceError::configuration("Tally API key not configured"));
        }

        info!("Starting leaderboard refresh");

        let proposals = tally.fetch_proposals().await.inspect_err(|e| {
            warn!(error = %e, "Proposal fetch failed, aborting refresh");
        })?;
        let total_proposals = proposals.len() as u32;
        info!(proposals = total_proposals, "Fetched proposals, fetching votes");

        let mut pacer = Pacer::new(self.ctx.clock(), 1, tally.vote_fetch_interval());
        let mut aggregator = VoterAggregator::new();
        let mut skipped = Vec::new();

        for (index, proposal) in proposals.iter().enumerate() {
            pacer.ready().await;

            match tally.fetch_votes(&proposal.id).await {
                Ok(votes) => {
                    info!(
                        proposal = index + 1,
                        of = proposals.len(),
                        proposal_id = %proposal.id,
                        votes = votes.len(),
                        "Processed votes"
                    );
                    aggregator.observe_all(&votes);
                }
                Err(e) => {
                    warn!(proposal_id = %proposal.id, error = %e, "Skipping proposal");
                    skipped.push(SkippedItem::votes(&proposal.id, e.to_string()));
                }
            }
        }

        let mut voter_data = aggregator.finalize(total_proposals);
        skipped.extend(self.ctx.resolver().resolve(&mut voter_data).await);

        let snapshot = LeaderboardSnapshot::new(voter_data, total_proposals, self.ctx.clock().now());
        self.ctx
            .store()
            .set(LEADERBOARD_CACHE_KEY, &snapshot)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to persist snapshot"))?;

        info!(
            proposals = snapshot.total_proposals,
            voters = snapshot.voter_count(),
            resolved_names = snapshot.resolved_names(),
            skipped = skipped.len(),
            "Leaderboard refresh finished"
        );

        Ok(RefreshReport {
            run_id,
            snapshot,
            skipped,
        })
    }

    /// Current snapshot, if one has been stored
    pub async fn cached_snapshot(&self) -> ServiceResult<Option<LeaderboardSnapshot>> {
        Ok(self.ctx.store().get(LEADERBOARD_CACHE_KEY).await?)
    }

    /// Current snapshot, running the pipeline on a miss
    pub async fn get_or_refresh(&self) -> ServiceResult<LeaderboardRead> {
        if let Some(snapshot) = self.cached_snapshot().await? {
            return Ok(LeaderboardRead {
                snapshot,
                cached: true,
            });
        }

        info!("No cached leaderboard, running refresh");
        let report = self.run_full_refresh().await?;
        Ok(LeaderboardRead {
            snapshot: report.snapshot,
            cached: false,
        })
    }

    /// Check that the snapshot store is reachable
    pub async fn store_ready(&self) -> bool {
        match self.ctx.store().health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Snapshot store health check failed");
                false
            }
        }
    }
}
