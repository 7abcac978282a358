// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! In-memory per-height proposal and vote indices.

use std::collections::HashMap;

use anyhow::anyhow;

use vertexbft_traits::{Cache, Error, Hash, Proposal, Quorum, Vote};

/// Volatile cache of proposals by proposer and votes by signer, bucketed
/// by height.
///
/// Buckets keep their entries in encounter order, so the quorums extracted
/// from them list signers in the order their votes arrived. Everything at
/// or below a height is dropped in one sweep once that height can no
/// longer matter.
#[derive(Clone, Debug, Default)]
pub struct Volatile {
    proposals: HashMap<u64, Vec<Proposal>>,
    votes: HashMap<u64, Vec<Vote>>,
}

impl Volatile {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of height buckets currently holding proposals.
    pub fn proposal_heights(&self) -> usize {
        self.proposals.len()
    }

    /// Number of height buckets currently holding votes.
    pub fn vote_heights(&self) -> usize {
        self.votes.len()
    }

    /// The recorded proposal for a proposer at a height, if any.
    pub fn proposal_by(&self, height: u64, proposer_id: Hash) -> Option<&Proposal> {
        self.proposals
            .get(&height)?
            .iter()
            .find(|proposal| proposal.candidate.proposer_id == proposer_id)
    }

    /// The recorded vote of a signer at a height, if any.
    pub fn vote_by(&self, height: u64, signer_id: Hash) -> Option<&Vote> {
        self.votes
            .get(&height)?
            .iter()
            .find(|vote| vote.signer_id == signer_id)
    }
}

impl Cache for Volatile {
    fn store_proposal(&mut self, proposal: Proposal) -> Result<(), Error> {
        let bucket = self
            .proposals
            .entry(proposal.candidate.height)
            .or_default();

        // a proposer gets one slot per height; a second proposal is either
        // the same one again or equivocation
        if let Some(existing) = bucket
            .iter()
            .find(|known| known.candidate.proposer_id == proposal.candidate.proposer_id)
        {
            if existing.candidate.id() != proposal.candidate.id() {
                return Err(Error::DoubleProposal {
                    first: Box::new(existing.clone()),
                    second: Box::new(proposal),
                });
            }
            return Ok(());
        }

        bucket.push(proposal);
        Ok(())
    }

    fn store_vote(&mut self, vote: Vote) -> Result<(), Error> {
        let bucket = self.votes.entry(vote.height).or_default();

        if let Some(existing) = bucket
            .iter()
            .find(|known| known.signer_id == vote.signer_id)
        {
            if existing.candidate_id != vote.candidate_id {
                return Err(Error::DoubleVote {
                    first: existing.clone(),
                    second: vote,
                });
            }
            return Ok(());
        }

        bucket.push(vote);
        Ok(())
    }

    fn quorum(&self, height: u64, candidate_id: Hash) -> Result<Quorum, anyhow::Error> {
        let bucket = self
            .votes
            .get(&height)
            .ok_or_else(|| anyhow!("height unknown ({height})"))?;

        let mut quorum = Quorum::default();
        for vote in bucket {
            if vote.candidate_id != candidate_id {
                continue;
            }
            quorum.signer_ids.push(vote.signer_id);
            quorum.signature.extend_from_slice(&vote.signature);
        }

        Ok(quorum)
    }

    fn clear(&mut self, cutoff: u64) {
        self.proposals.retain(|height, _| *height > cutoff);
        self.votes.retain(|height, _| *height > cutoff);
    }
}
