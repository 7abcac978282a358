// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The vertex store the processor drives forward.
//!
//! The processor makes no assumption about the backing shape beyond the
//! five operations below: the reference implementation is a simple chain,
//! but any store that partitions known vertices into a final vertex, a tip
//! and pending candidates can back the core.

use crate::model::{Hash, Vertex};

/// Persistent graph state, external to the core.
///
/// Confirmation counts are per vertex id and never decrease; the final
/// vertex's height never decreases either.
pub trait Graph {
    /// Try to extend the graph with the given candidate vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the candidate is not a valid extension of the
    /// current state, for example when an ancestor is missing or the
    /// extension would bypass the finalized boundary.
    fn extend(&mut self, vertex: Vertex) -> Result<(), anyhow::Error>;

    /// Add one confirmation to the vertex with the given id, which may
    /// promote it to tip or finalize it.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is unknown.
    fn confirm(&mut self, vertex_id: Hash) -> Result<(), anyhow::Error>;

    /// Whether the vertex has already been applied as a candidate.
    fn contains(&self, vertex_id: Hash) -> bool;

    /// The highest-scoring confirmed-but-not-final vertex, the preferred
    /// parent for extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is corrupted.
    fn tip(&self) -> Result<Vertex, anyhow::Error>;

    /// The highest vertex with enough accumulated confirmations to be
    /// treated as immutable.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is corrupted.
    fn finalized(&self) -> Result<Vertex, anyhow::Error>;
}
