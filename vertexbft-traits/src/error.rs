// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The rejection taxonomy of the consensus core.
//!
//! The processor never swallows a failure: every rejected message maps to a
//! specific variant of [`Error`], and every variant carries the evidence a
//! driver needs to act on it, such as the offending message pair for
//! equivocation, the expected collector for misrouted votes, or the tip or
//! final vertex a message lost against.
//!
//! Variants are classified by [`Attribution`]: benign rejections may simply
//! be dropped, byzantine ones carry evidence that can be forwarded to a
//! slashing subsystem, and fatal ones indicate the graph or a collaborator
//! is corrupted.

use crate::crypto::VerifyError;
use crate::message::{Proposal, Vote};
use crate::model::{Hash, Vertex};

/// Who is to blame for a rejected message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribution {
    /// Local condition; the message may be dropped without consequence.
    Benign,

    /// Attributable misbehaviour; the evidence in the error is forwardable.
    Byzantine,

    /// The graph, a collaborator or the driver contract is broken.
    Fatal,
}

/// Errors produced by the consensus processor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The proposed candidate is already part of the graph.
    #[error("stale proposal (height: {}, candidate: {})", .proposal.candidate.height, .proposal.candidate.id())]
    StaleProposal { proposal: Box<Proposal> },

    /// The proposal was made by someone other than the leader for its height.
    #[error("invalid proposer (proposer: {}, leader: {leader})", .proposal.candidate.proposer_id)]
    InvalidProposer { proposal: Box<Proposal>, leader: Hash },

    /// The proposal is in conflict with the immutable finalized state.
    #[error("conflicting proposal (height: {}, final: {})", .proposal.candidate.height, .finalized.height)]
    ConflictingProposal {
        proposal: Box<Proposal>,
        finalized: Vertex,
    },

    /// The proposal is already behind a candidate the majority agrees on.
    #[error("obsolete proposal (height: {}, tip: {})", .proposal.candidate.height, .tip.height)]
    ObsoleteProposal { proposal: Box<Proposal>, tip: Vertex },

    /// The proposer made two different proposals for the same height.
    #[error("double proposal (height: {}, proposer: {}, first: {}, second: {})",
        .first.candidate.height, .first.candidate.proposer_id, .first.candidate.id(), .second.candidate.id())]
    DoubleProposal {
        first: Box<Proposal>,
        second: Box<Proposal>,
    },

    /// The vote endorses a candidate that is already part of the graph.
    #[error("stale vote (height: {}, candidate: {})", .vote.height, .vote.candidate_id)]
    StaleVote { vote: Vote },

    /// The vote endorses a candidate below the finalized state.
    #[error("conflicting vote (height: {}, final: {})", .vote.height, .finalized.height)]
    ConflictingVote { vote: Vote, finalized: Vertex },

    /// The vote endorses a candidate already behind the agreed tip.
    #[error("obsolete vote (height: {}, tip: {})", .vote.height, .tip.height)]
    ObsoleteVote { vote: Vote, tip: Vertex },

    /// The vote was delivered to a participant who is not its collector.
    #[error("invalid collector (sender: {}, receiver: {receiver}, collector: {collector})", .vote.signer_id)]
    InvalidCollector {
        vote: Vote,
        receiver: Hash,
        collector: Hash,
    },

    /// The signer voted for two different candidates at the same height.
    #[error("double vote (height: {}, voter: {}, first: {}, second: {})",
        .first.height, .first.signer_id, .first.candidate_id, .second.candidate_id)]
    DoubleVote { first: Vote, second: Vote },

    /// Bootstrap was attempted on a graph whose tip is not at height zero.
    #[error("invalid bootstrap (tip height: {})", .tip.height)]
    InvalidBootstrap { tip: Vertex },

    /// A signature or quorum failed cryptographic verification.
    #[error(transparent)]
    InvalidSignature(#[from] VerifyError),

    /// A collaborator (graph, builder, network) failed.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Classify this rejection for the driver.
    pub fn attribution(&self) -> Attribution {
        match self {
            Error::StaleProposal { .. }
            | Error::ObsoleteProposal { .. }
            | Error::StaleVote { .. }
            | Error::ObsoleteVote { .. } => Attribution::Benign,
            Error::ConflictingProposal { .. }
            | Error::ConflictingVote { .. }
            | Error::InvalidProposer { .. }
            | Error::InvalidCollector { .. }
            | Error::DoubleProposal { .. }
            | Error::DoubleVote { .. }
            | Error::InvalidSignature(_) => Attribution::Byzantine,
            Error::InvalidBootstrap { .. } | Error::Internal(_) => Attribution::Fatal,
        }
    }
}
