// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Fixture constructors shared by unit and integration tests.

use vertexbft_traits::{Hash, Proposal, Quorum, Vertex, Vote};

use super::mock_crypto::sign;

/// A distinct, recognizable hash constant per seed.
pub fn hash(seed: u8) -> Hash {
    Hash::new([seed; 32])
}

/// Distinct hash constants for seeds `1..=n`.
pub fn hashes(n: u8) -> Vec<Hash> {
    (1..=n).map(hash).collect()
}

/// The genesis vertex: height zero, no parent, no proposer, no payload.
pub fn root_vertex() -> Vertex {
    Vertex {
        height: 0,
        parent_id: Hash::ZERO,
        proposer_id: Hash::ZERO,
        arc_id: Hash::ZERO,
    }
}

/// A child of the given parent, distinguished by its payload commitment.
pub fn vertex_on(parent: &Vertex, arc_id: Hash) -> Vertex {
    Vertex {
        height: parent.height + 1,
        parent_id: parent.id(),
        proposer_id: Hash::ZERO,
        arc_id,
    }
}

/// A fully specified candidate vertex.
pub fn candidate(height: u64, parent_id: Hash, proposer_id: Hash, arc_id: Hash) -> Vertex {
    Vertex {
        height,
        parent_id,
        proposer_id,
        arc_id,
    }
}

/// A vote carrying a valid signature under the deterministic test scheme.
pub fn signed_vote(height: u64, candidate_id: Hash, signer_id: Hash) -> Vote {
    Vote {
        height,
        candidate_id,
        signer_id,
        signature: sign(signer_id, candidate_id),
    }
}

/// A quorum over the given parent whose aggregated signature verifies for
/// the listed signers, in order.
pub fn quorum_for(parent_id: Hash, signers: &[Hash]) -> Quorum {
    let mut quorum = Quorum::default();
    for signer in signers {
        quorum.signer_ids.push(*signer);
        quorum.signature.extend_from_slice(&sign(*signer, parent_id));
    }
    quorum
}

/// A proposal for the given candidate with a validly signed proposal
/// signature and a verifiable parent quorum from the listed signers.
pub fn proposal_for(vertex: Vertex, quorum_signers: &[Hash]) -> Proposal {
    Proposal {
        candidate: vertex,
        parent_quorum: quorum_for(vertex.parent_id, quorum_signers),
        signature: sign(vertex.proposer_id, vertex.id()),
    }
}

/// A minimal valid proposal with an empty (but well-formed) parent quorum.
pub fn signed_proposal(height: u64, parent_id: Hash, proposer_id: Hash, arc_id: Hash) -> Proposal {
    proposal_for(candidate(height, parent_id, proposer_id, arc_id), &[])
}
