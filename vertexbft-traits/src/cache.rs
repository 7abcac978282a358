// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Volatile per-height message indices.

use crate::error::Error;
use crate::message::{Proposal, Quorum, Vote};
use crate::model::Hash;

/// Stores proposals and votes per height, detects equivocation, and
/// extracts quorums.
///
/// The cache is the sole owner of its entries: they are created on
/// acceptance, never rewritten, and dropped wholesale by [`Cache::clear`].
/// For every `(height, signer)` pair at most one proposal and one vote are
/// ever recorded; a second, different message from the same signer is the
/// equivocation evidence returned in the error.
pub trait Cache {
    /// Record a proposal, keyed by the candidate's height and proposer.
    ///
    /// Re-storing an identical proposal is an idempotent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleProposal`] when the proposer already has a
    /// different proposal recorded at this height.
    fn store_proposal(&mut self, proposal: Proposal) -> Result<(), Error>;

    /// Record a vote, keyed by its height and signer.
    ///
    /// Re-storing an identical vote is an idempotent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleVote`] when the signer already has a
    /// different vote recorded at this height.
    fn store_vote(&mut self, vote: Vote) -> Result<(), Error>;

    /// Aggregate the recorded votes for the candidate at the given height
    /// into a fresh quorum, preserving the order in which the votes were
    /// encountered.
    ///
    /// An empty-but-valid quorum is returned when the height bucket exists
    /// but holds no votes for this candidate.
    ///
    /// # Errors
    ///
    /// Returns an error only when no votes at all have been recorded for
    /// the height.
    fn quorum(&self, height: u64, candidate_id: Hash) -> Result<Quorum, anyhow::Error>;

    /// Drop every entry at or below the cutoff height. Idempotent.
    fn clear(&mut self, cutoff: u64);
}
