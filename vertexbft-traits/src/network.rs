// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Network transport surface and the message envelope.

use serde::{Deserialize, Serialize};

use crate::message::{Proposal, Vote};
use crate::model::Hash;

/// A consensus message in flight.
///
/// Used by the transport and by the driver's inbox; proposals are boxed
/// because they dominate the envelope size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// A leader's proposal, broadcast to all participants.
    Proposal(Box<Proposal>),

    /// A single vote, transmitted point-to-point to its collector.
    Vote(Vote),
}

/// Outbound transport to the other participants.
pub trait Network {
    /// Send a proposal to all participants.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport failed.
    fn broadcast(&mut self, proposal: &Proposal) -> Result<(), anyhow::Error>;

    /// Send a vote point-to-point to the given recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport failed or the recipient is
    /// unknown.
    fn transmit(&mut self, vote: &Vote, recipient: Hash) -> Result<(), anyhow::Error>;
}
