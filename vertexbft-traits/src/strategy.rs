// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Role selection.
//!
//! A participant's role at a height is a function of the height, not a
//! type: the processor derives proposer, collector and voter behaviour
//! from pure comparisons against these outputs.

use crate::model::Hash;

/// Deterministic role selection over the participant set.
///
/// All three functions are pure, total and side-effect-free: the same
/// height always yields the same answer on every participant.
pub trait Strategy {
    /// The participant expected to propose at the given height.
    fn leader(&self, height: u64) -> Hash;

    /// The participant responsible for aggregating votes for candidates at
    /// the given height, which is the proposer of the following round.
    fn collector(&self, height: u64) -> Hash;

    /// Minimum number of distinct signers required for a quorum at the
    /// given height.
    fn threshold(&self, height: u64) -> u32;
}
