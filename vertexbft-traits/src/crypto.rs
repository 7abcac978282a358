// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Cryptographic capability surfaces.
//!
//! The core is agnostic to the signature scheme: it only requires that the
//! signer can produce votes and proposals bound to its own identity, and
//! that the verifier can check those bindings. Signatures are computed over
//! the candidate's canonical id (see [`crate::model::Vertex::canonical_bytes`]),
//! never over a re-encoding of the enclosing message.

use crate::message::{Proposal, Quorum, Vote};
use crate::model::{Hash, Vertex};

/// Errors possible during signature verification.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// The signer is not a known participant.
    #[error("unknown signer ({signer})")]
    UnknownSigner { signer: Hash },

    /// An individual signature does not bind its signer to the target.
    #[error("invalid signature (signer: {signer})")]
    InvalidSignature { signer: Hash },

    /// The aggregated quorum signature is invalid for the signer list.
    #[error("invalid quorum (candidate: {candidate})")]
    InvalidQuorum { candidate: Hash },
}

/// Produces signed messages for this participant.
pub trait Signer {
    /// Own identity.
    fn self_id(&self) -> Hash;

    /// Produce a signed vote for the given vertex from [`Self::self_id`].
    ///
    /// # Errors
    ///
    /// Returns an error if the signing backend fails.
    fn vote(&self, candidate: &Vertex) -> Result<Vote, anyhow::Error>;

    /// Produce a signed proposal for the given candidate, embedding the
    /// quorum that certifies the candidate's parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the signing backend fails.
    fn proposal(&self, candidate: &Vertex, parent_quorum: Quorum) -> Result<Proposal, anyhow::Error>;
}

/// Checks signatures on incoming messages.
pub trait Verifier {
    /// Verify that the proposal signature binds the proposer to the
    /// candidate's id.
    fn proposal(&self, proposal: &Proposal) -> Result<(), VerifyError>;

    /// Verify that the vote signature binds the signer to the candidate id.
    fn vote(&self, vote: &Vote) -> Result<(), VerifyError>;

    /// Verify that the aggregated signature in the proposal's parent quorum
    /// is valid for the candidate's parent id with the enclosed signer list.
    fn quorum(&self, proposal: &Proposal) -> Result<(), VerifyError>;
}
