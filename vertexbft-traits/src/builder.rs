// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Payload production.

use crate::model::Hash;

/// Supplies payload commitments for new candidates.
///
/// The core treats the commitment as opaque: payload contents and their
/// validation are entirely outside the consensus boundary.
pub trait Builder {
    /// Produce the payload commitment for the next candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if no payload can be produced.
    fn arc(&mut self) -> Result<Hash, anyhow::Error>;
}
