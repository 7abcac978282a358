// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! A chain-shaped reference graph.

use std::collections::HashMap;

use anyhow::anyhow;
use tracing::debug;

use vertexbft_traits::{Graph, Hash, Vertex};

/// Confirmations a vertex needs to be treated as final.
pub const FINALITY_CONFIRMATIONS: u32 = 3;

/// A simple chain of vertices backing the consensus core.
///
/// The root vertex anchors the graph: it starts out as both tip and final,
/// and it is not part of the candidate set (`contains` answers whether a
/// vertex has been applied as a candidate, and the root predates consensus).
/// Candidates extend the chain from the root; confirmations accumulate per
/// vertex and promote candidates to tip and, eventually, to final.
pub struct Chain {
    root: Vertex,
    candidates: HashMap<Hash, Vertex>,
    confirmations: HashMap<Hash, u32>,
    final_id: Hash,
    tip_id: Hash,
}

impl Chain {
    /// Create a chain anchored at the given root vertex.
    pub fn new(root: Vertex) -> Self {
        let root_id = root.id();
        Chain {
            root,
            candidates: HashMap::new(),
            confirmations: HashMap::new(),
            final_id: root_id,
            tip_id: root_id,
        }
    }

    /// Confirmation count recorded for a vertex.
    pub fn confirmations(&self, vertex_id: Hash) -> u32 {
        self.confirmations.get(&vertex_id).copied().unwrap_or(0)
    }

    fn lookup(&self, vertex_id: Hash) -> Option<Vertex> {
        if vertex_id == self.root.id() {
            return Some(self.root);
        }
        self.candidates.get(&vertex_id).copied()
    }
}

impl Graph for Chain {
    fn extend(&mut self, vertex: Vertex) -> Result<(), anyhow::Error> {
        let finalized = self
            .lookup(self.final_id)
            .ok_or_else(|| anyhow!("could not find final ({})", self.final_id))?;

        // trace back from the candidate until we either reach the final
        // vertex directly, pass below its height (the extension would
        // bypass finalized state), or fall off the known graph
        let mut ancestor_id = vertex.parent_id;
        while ancestor_id != self.final_id {
            let ancestor = self
                .lookup(ancestor_id)
                .ok_or_else(|| anyhow!("no link to finalized state (ancestor: {ancestor_id})"))?;
            if ancestor.height < finalized.height {
                return Err(anyhow!(
                    "extension bypasses finalized state (ancestor: {}, final: {})",
                    ancestor.height,
                    finalized.height
                ));
            }
            ancestor_id = ancestor.parent_id;
        }

        self.candidates.insert(vertex.id(), vertex);
        Ok(())
    }

    fn confirm(&mut self, vertex_id: Hash) -> Result<(), anyhow::Error> {
        let vertex = self
            .lookup(vertex_id)
            .ok_or_else(|| anyhow!("could not find vertex ({vertex_id})"))?;

        let count = self.confirmations.entry(vertex_id).or_insert(0);
        *count += 1;
        let count = *count;

        // finalization only ever moves forward
        let finalized = self
            .lookup(self.final_id)
            .ok_or_else(|| anyhow!("could not find final ({})", self.final_id))?;
        if count >= FINALITY_CONFIRMATIONS && vertex.height > finalized.height {
            debug!(height = vertex.height, vertex = %vertex_id, "vertex finalized");
            self.final_id = vertex_id;
        }

        // a higher candidate with at least as many confirmations takes the
        // tip over; at equal height it needs strictly more
        let tip = self
            .lookup(self.tip_id)
            .ok_or_else(|| anyhow!("could not find tip ({})", self.tip_id))?;
        let tip_count = self.confirmations(self.tip_id);
        if (vertex.height > tip.height && count >= tip_count)
            || (vertex.height == tip.height && count > tip_count)
        {
            debug!(height = vertex.height, vertex = %vertex_id, "tip advanced");
            self.tip_id = vertex_id;
        }

        Ok(())
    }

    fn contains(&self, vertex_id: Hash) -> bool {
        self.candidates.contains_key(&vertex_id)
    }

    fn tip(&self) -> Result<Vertex, anyhow::Error> {
        self.lookup(self.tip_id)
            .ok_or_else(|| anyhow!("could not find tip ({})", self.tip_id))
    }

    fn finalized(&self) -> Result<Vertex, anyhow::Error> {
        self.lookup(self.final_id)
            .ok_or_else(|| anyhow!("could not find final ({})", self.final_id))
    }
}
