// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Base value types of the consensus graph.
//!
//! Identity in this system is a 32-byte hash over a canonical byte
//! encoding. Two vertices with equal fields hash to the same id on every
//! implementation, which is what lets participants agree on candidates
//! without exchanging anything beyond the fields themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque signature bytes produced by whatever scheme the signer uses.
pub type Signature = Vec<u8>;

/// A 256-bit identifier for entities in the system.
///
/// The all-zeroes value is distinguished and denotes "none" (for example
/// the parent of the genesis vertex).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Hash([u8; 32]);

impl Hash {
    /// The distinguished zero value.
    pub const ZERO: Hash = Hash([0u8; 32]);

    /// Create a hash from a fixed-size byte array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    /// Hash arbitrary data into an identifier.
    pub fn digest(data: &[u8]) -> Self {
        Hash(*blake3::hash(data).as_bytes())
    }

    /// Create a hash from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, anyhow::Error> {
        if bytes.len() != 32 {
            return Err(anyhow::anyhow!("invalid hash length: {}", bytes.len()));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(Hash(arr))
    }

    /// Get the byte representation of this hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the distinguished zero value.
    pub fn is_zero(&self) -> bool {
        *self == Hash::ZERO
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // full hex is noise in logs; eight characters identify a vertex
        // just fine at test and debug scale
        write!(f, "{}", hex::encode(&self.0[..4]))
    }
}

/// A node in the consensus graph.
///
/// A vertex bundles its distance from the root (`height`), the reference to
/// its parent, the participant that proposed it, and an opaque payload
/// commitment (`arc_id`) supplied by the builder. Vertices are value types:
/// immutable once constructed, identified by the hash of their canonical
/// encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// How far the vertex is removed from the root of the graph.
    pub height: u64,

    /// Identity of the parent vertex ([`Hash::ZERO`] for the root).
    pub parent_id: Hash,

    /// The participant that proposed this vertex.
    pub proposer_id: Hash,

    /// Opaque payload commitment, the edge between parent and child.
    pub arc_id: Hash,
}

/// Length of the canonical vertex encoding in bytes.
pub const VERTEX_ENCODED_LEN: usize = 8 + 32 + 32 + 32;

impl Vertex {
    /// The canonical byte encoding: big-endian height followed by the
    /// parent, proposer and arc identifiers in declared order.
    ///
    /// Signatures and identifiers are computed over this encoding, so it
    /// must be byte-exact across implementations.
    pub fn canonical_bytes(&self) -> [u8; VERTEX_ENCODED_LEN] {
        let mut buf = [0u8; VERTEX_ENCODED_LEN];
        buf[0..8].copy_from_slice(&self.height.to_be_bytes());
        buf[8..40].copy_from_slice(self.parent_id.as_bytes());
        buf[40..72].copy_from_slice(self.proposer_id.as_bytes());
        buf[72..104].copy_from_slice(self.arc_id.as_bytes());
        buf
    }

    /// The unique identifier of this vertex.
    pub fn id(&self) -> Hash {
        Hash::digest(&self.canonical_bytes())
    }
}
