// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Deterministic payload builder mock.

use anyhow::anyhow;

use vertexbft_traits::{Builder, Hash};

/// Produces a deterministic sequence of distinct payload commitments.
#[derive(Clone, Debug, Default)]
pub struct SequenceBuilder {
    counter: u64,

    /// When set, [`Builder::arc`] fails.
    pub fail: bool,
}

impl SequenceBuilder {
    /// Create a builder starting at the beginning of the sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commitments produced so far.
    pub fn produced(&self) -> u64 {
        self.counter
    }
}

impl Builder for SequenceBuilder {
    fn arc(&mut self) -> Result<Hash, anyhow::Error> {
        if self.fail {
            return Err(anyhow!("no payload available"));
        }
        let mut data = *b"arc-____________________________";
        data[4..12].copy_from_slice(&self.counter.to_be_bytes());
        self.counter += 1;
        Ok(Hash::digest(&data))
    }
}
