//! Voter aggregation
//!
//! Folds the votes of one run into per-voter statistics and projects them
//! into the sorted leaderboard rows.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::entities::{Vote, VoterData, VoterRecord};

/// Per-run accumulator keyed by voter address.
///
/// Records are kept in first-observed order so that ties in the final sort
/// follow input encounter order.
#[derive(Debug, Default)]
pub struct VoterAggregator {
    index: HashMap<String, usize>,
    records: Vec<VoterRecord>,
}

impl VoterAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single vote into the accumulator
    pub fn observe(&mut self, vote: &Vote) {
        match self.index.get(&vote.voter) {
            Some(&position) => self.records[position].observe(vote),
            None => {
                self.index.insert(vote.voter.clone(), self.records.len());
                self.records.push(VoterRecord::from_vote(vote));
            }
        }
    }

    /// Fold every vote of an iterator
    pub fn observe_all<'a>(&mut self, votes: impl IntoIterator<Item = &'a Vote>) {
        for vote in votes {
            self.observe(vote);
        }
    }

    /// Number of distinct voters seen so far
    #[inline]
    pub fn voter_count(&self) -> usize {
        self.records.len()
    }

    /// Project the records into leaderboard rows.
    ///
    /// Participation is measured against `total_proposals`, the number of
    /// proposals fetched in the run, not against the proposals that produced
    /// votes.
    pub fn finalize(self, total_proposals: u32) -> Vec<VoterData> {
        let mut rows: Vec<VoterData> = self
            .records
            .into_iter()
            .map(|record| {
                let proposals_voted = record.proposals_voted();
                VoterData {
                    participation_rate: participation_rate(proposals_voted, total_proposals),
                    first_vote: format_vote_date(record.first_vote_at),
                    last_vote: format_vote_date(record.last_vote_at),
                    address: record.address,
                    ens_name: None,
                    proposals_voted,
                }
            })
            .collect();

        // Vec::sort_by is stable
        rows.sort_by(|a, b| b.proposals_voted.cmp(&a.proposals_voted));
        rows
    }
}

/// Aggregate a complete vote set in one call
pub fn aggregate_votes<'a>(
    votes: impl IntoIterator<Item = &'a Vote>,
    total_proposals: u32,
) -> Vec<VoterData> {
    let mut aggregator = VoterAggregator::new();
    aggregator.observe_all(votes);
    aggregator.finalize(total_proposals)
}

fn participation_rate(proposals_voted: u32, total_proposals: u32) -> f64 {
    if total_proposals == 0 {
        return 0.0;
    }
    (f64::from(proposals_voted) / f64::from(total_proposals) * 100.0).min(100.0)
}

/// Calendar date of a vote in `M/D/YYYY` form (UTC)
pub fn format_vote_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-m/%-d/%Y").to_string()
}
