// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Messages exchanged between consensus participants.
//!
//! There are exactly two message kinds: a [`Proposal`] carries a leader's
//! candidate vertex together with a [`Quorum`] certifying its parent, and a
//! [`Vote`] carries a single signer's endorsement of a candidate. A
//! proposal implicitly contains the proposer's own vote, which the core
//! extracts with [`Proposal::vote`] when it acts as the collector.

use serde::{Deserialize, Serialize};

use crate::model::{Hash, Signature, Vertex};

/// An aggregated endorsement of a single candidate.
///
/// Holds the identities of the signers in the order their votes were
/// encountered, and their concatenated signatures. A quorum only justifies
/// a parent once it carries at least `threshold(height)` distinct signers;
/// that comparison is the processor's job, not the quorum's.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quorum {
    /// Signers whose votes are aggregated here, in encounter order.
    pub signer_ids: Vec<Hash>,

    /// The aggregated signature material.
    pub signature: Signature,
}

impl Quorum {
    /// Number of distinct signers backing this quorum.
    pub fn len(&self) -> usize {
        self.signer_ids.len()
    }

    /// Whether the quorum carries no signers at all.
    pub fn is_empty(&self) -> bool {
        self.signer_ids.is_empty()
    }
}

/// A leader's proposal for a new vertex in the consensus graph.
///
/// The signer of the proposal is `candidate.proposer_id`; the signature
/// covers the candidate's canonical id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// The proposed vertex.
    pub candidate: Vertex,

    /// Certificate for the candidate's parent.
    pub parent_quorum: Quorum,

    /// The proposer's signature over the candidate id.
    pub signature: Signature,
}

impl Proposal {
    /// Height of the proposed candidate.
    pub fn height(&self) -> u64 {
        self.candidate.height
    }

    /// Identity of the proposed candidate.
    pub fn candidate_id(&self) -> Hash {
        self.candidate.id()
    }

    /// The proposer's vote that is implicitly included in every proposal.
    ///
    /// The vote reuses the proposal signature: both cover the candidate's
    /// canonical id, so the extracted vote verifies against the proposer
    /// exactly like a vote the proposer would have sent explicitly.
    pub fn vote(&self) -> Vote {
        Vote {
            height: self.candidate.height,
            candidate_id: self.candidate.id(),
            signer_id: self.candidate.proposer_id,
            signature: self.signature.clone(),
        }
    }
}

/// A single signer's endorsement of a candidate vertex.
///
/// `height` always equals the height of the vertex identified by
/// `candidate_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Height of the endorsed candidate.
    pub height: u64,

    /// Identity of the endorsed candidate.
    pub candidate_id: Hash,

    /// The endorsing participant.
    pub signer_id: Hash,

    /// Signature over the candidate id.
    pub signature: Signature,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_proposal() -> Proposal {
        Proposal {
            candidate: Vertex {
                height: 4,
                parent_id: Hash::new([1u8; 32]),
                proposer_id: Hash::new([2u8; 32]),
                arc_id: Hash::new([3u8; 32]),
            },
            parent_quorum: Quorum {
                signer_ids: vec![Hash::new([5u8; 32]), Hash::new([6u8; 32])],
                signature: vec![0xaa, 0xbb],
            },
            signature: vec![0xcc, 0xdd],
        }
    }

    #[test]
    fn test_implicit_vote_extraction() {
        let proposal = sample_proposal();
        let vote = proposal.vote();
        assert_eq!(vote.height, proposal.candidate.height);
        assert_eq!(vote.candidate_id, proposal.candidate.id());
        assert_eq!(vote.signer_id, proposal.candidate.proposer_id);
        assert_eq!(vote.signature, proposal.signature);
    }

    #[test]
    fn test_quorum_len() {
        let proposal = sample_proposal();
        assert_eq!(proposal.parent_quorum.len(), 2);
        assert!(!proposal.parent_quorum.is_empty());
        assert!(Quorum::default().is_empty());
    }

    #[test]
    fn test_proposal_wire_roundtrip() {
        let proposal = sample_proposal();
        let encoded = serde_json::to_string(&proposal).unwrap();
        let decoded: Proposal = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, proposal);
        assert_eq!(decoded.candidate.id(), proposal.candidate.id());
    }
}
