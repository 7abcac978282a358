// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Recording network and looper mocks.

use anyhow::anyhow;

use vertexbft_traits::{Hash, Looper, Network, Proposal, Vote};

/// A network that records outbound traffic instead of sending it.
#[derive(Clone, Debug, Default)]
pub struct RecordingNetwork {
    /// Broadcast proposals, in call order.
    pub broadcasts: Vec<Proposal>,

    /// Point-to-point votes with their recipients, in call order.
    pub transmissions: Vec<(Vote, Hash)>,

    /// When set, both operations fail.
    pub fail: bool,
}

impl RecordingNetwork {
    /// Create an empty recording network.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Network for RecordingNetwork {
    fn broadcast(&mut self, proposal: &Proposal) -> Result<(), anyhow::Error> {
        if self.fail {
            return Err(anyhow!("broadcast failed"));
        }
        self.broadcasts.push(proposal.clone());
        Ok(())
    }

    fn transmit(&mut self, vote: &Vote, recipient: Hash) -> Result<(), anyhow::Error> {
        if self.fail {
            return Err(anyhow!("transmit failed"));
        }
        self.transmissions.push((vote.clone(), recipient));
        Ok(())
    }
}

/// A looper that records looped messages instead of queueing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingLooper {
    /// Looped votes, in call order.
    pub votes: Vec<Vote>,

    /// Looped proposals, in call order.
    pub proposals: Vec<Proposal>,
}

impl RecordingLooper {
    /// Create an empty recording looper.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Looper for RecordingLooper {
    fn vote(&mut self, vote: Vote) {
        self.votes.push(vote);
    }

    fn proposal(&mut self, proposal: Proposal) {
        self.proposals.push(proposal);
    }
}
