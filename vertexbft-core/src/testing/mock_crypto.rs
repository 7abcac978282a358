// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Deterministic keyless signer and verifier.

use std::cell::Cell;

use vertexbft_traits::{
    Hash, Proposal, Quorum, Signature, Signer, Verifier, VerifyError, Vertex, Vote,
};

/// Produce the deterministic test signature binding a signer to a target.
///
/// The "scheme" hashes the signer identity together with the signed target,
/// so a signature verifies if and only if it was produced for exactly that
/// signer and target. Quorum signatures are the concatenation of the
/// member signatures in signer-list order.
pub fn sign(signer: Hash, target: Hash) -> Signature {
    let mut data = Vec::with_capacity(64);
    data.extend_from_slice(signer.as_bytes());
    data.extend_from_slice(target.as_bytes());
    blake3::hash(&data).as_bytes().to_vec()
}

/// A signer with a fixed identity using the deterministic test scheme.
#[derive(Clone, Debug)]
pub struct MockSigner {
    id: Hash,
}

impl MockSigner {
    /// Create a signer for the given identity.
    pub fn new(id: Hash) -> Self {
        MockSigner { id }
    }
}

impl Signer for MockSigner {
    fn self_id(&self) -> Hash {
        self.id
    }

    fn vote(&self, candidate: &Vertex) -> Result<Vote, anyhow::Error> {
        let candidate_id = candidate.id();
        Ok(Vote {
            height: candidate.height,
            candidate_id,
            signer_id: self.id,
            signature: sign(self.id, candidate_id),
        })
    }

    fn proposal(
        &self,
        candidate: &Vertex,
        parent_quorum: Quorum,
    ) -> Result<Proposal, anyhow::Error> {
        Ok(Proposal {
            candidate: *candidate,
            parent_quorum,
            signature: sign(self.id, candidate.id()),
        })
    }
}

/// A verifier for the deterministic test scheme that counts its calls.
///
/// The call counters let tests assert that a rejection short-circuited the
/// pipeline before any signature check happened.
#[derive(Debug, Default)]
pub struct MockVerifier {
    proposal_calls: Cell<usize>,
    vote_calls: Cell<usize>,
    quorum_calls: Cell<usize>,
}

impl MockVerifier {
    /// Create a verifier with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of proposal signature checks performed.
    pub fn proposal_calls(&self) -> usize {
        self.proposal_calls.get()
    }

    /// Number of vote signature checks performed.
    pub fn vote_calls(&self) -> usize {
        self.vote_calls.get()
    }

    /// Number of quorum checks performed.
    pub fn quorum_calls(&self) -> usize {
        self.quorum_calls.get()
    }
}

impl Verifier for MockVerifier {
    fn proposal(&self, proposal: &Proposal) -> Result<(), VerifyError> {
        self.proposal_calls.set(self.proposal_calls.get() + 1);
        let signer = proposal.candidate.proposer_id;
        if proposal.signature != sign(signer, proposal.candidate.id()) {
            return Err(VerifyError::InvalidSignature { signer });
        }
        Ok(())
    }

    fn vote(&self, vote: &Vote) -> Result<(), VerifyError> {
        self.vote_calls.set(self.vote_calls.get() + 1);
        if vote.signature != sign(vote.signer_id, vote.candidate_id) {
            return Err(VerifyError::InvalidSignature {
                signer: vote.signer_id,
            });
        }
        Ok(())
    }

    fn quorum(&self, proposal: &Proposal) -> Result<(), VerifyError> {
        self.quorum_calls.set(self.quorum_calls.get() + 1);
        let parent_id = proposal.candidate.parent_id;
        let quorum = &proposal.parent_quorum;

        if quorum.signature.len() != quorum.signer_ids.len() * 32 {
            return Err(VerifyError::InvalidQuorum {
                candidate: parent_id,
            });
        }
        for (index, signer) in quorum.signer_ids.iter().enumerate() {
            let chunk = &quorum.signature[index * 32..(index + 1) * 32];
            if chunk != sign(*signer, parent_id).as_slice() {
                return Err(VerifyError::InvalidQuorum {
                    candidate: parent_id,
                });
            }
        }
        Ok(())
    }
}
