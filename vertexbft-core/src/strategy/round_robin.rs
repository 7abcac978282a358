// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Round-robin role selection.

use vertexbft_traits::{Hash, Strategy};

/// Rotates the proposer role through the participant set by height.
///
/// The collector of a height is the leader of the next one: whoever
/// aggregates the votes at height `h` is the participant that turns them
/// into the proposal at `h + 1`. The quorum threshold is ⌊2n/3⌋ distinct
/// signers.
#[derive(Clone, Debug)]
pub struct RoundRobin {
    participants: Vec<Hash>,
}

impl RoundRobin {
    /// Create a strategy over an ordered, non-empty participant set.
    ///
    /// # Panics
    ///
    /// Panics if the participant set is empty.
    pub fn new(participants: Vec<Hash>) -> Self {
        assert!(
            !participants.is_empty(),
            "strategy requires at least one participant"
        );
        RoundRobin { participants }
    }

    /// Number of participants in the set.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the participant set is empty (never true by construction).
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl Strategy for RoundRobin {
    fn leader(&self, height: u64) -> Hash {
        let index = (height % self.participants.len() as u64) as usize;
        self.participants[index]
    }

    fn collector(&self, height: u64) -> Hash {
        self.leader(height + 1)
    }

    fn threshold(&self, _height: u64) -> u32 {
        (self.participants.len() * 2 / 3) as u32
    }
}
