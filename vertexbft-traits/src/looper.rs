// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Priority self-message channel.

use crate::message::{Proposal, Vote};

/// Loops messages back to ourselves with priority, pre-empting any
/// externally received message that might be submitted next.
///
/// The looper is owned by the driver: its contract is that looped messages
/// are delivered to the processor before any pending external message. The
/// processor emits at most two self-messages per proposal and one per vote,
/// so the backing queue may be small and bounded; overflowing it means the
/// driver or the processor broke that contract.
pub trait Looper {
    /// Enqueue a vote for priority self-processing.
    fn vote(&mut self, vote: Vote);

    /// Enqueue a proposal for priority self-processing.
    fn proposal(&mut self, proposal: Proposal);
}
