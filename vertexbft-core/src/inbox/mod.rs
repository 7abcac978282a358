// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The driver's two-priority message inbox.

use std::collections::VecDeque;

use vertexbft_traits::{Looper, Message, Proposal, Vote};

/// Default capacity of the loopback queue.
///
/// The processor emits at most two self-messages per proposal and one per
/// vote, and the driver drains loopback between dispatches, so the queue
/// never legitimately holds more than a handful of messages.
pub const DEFAULT_LOOPBACK_CAPACITY: usize = 8;

/// A two-priority inbox: a bounded loopback channel fed by the processor
/// itself, and an external channel fed by the driver with messages received
/// from the network.
///
/// [`PriorityInbox::next`] always drains the loopback channel before
/// handing out an external message, which is what gives the processor's own
/// outputs precedence over freshly arriving traffic.
#[derive(Clone, Debug)]
pub struct PriorityInbox {
    loopback: VecDeque<Message>,
    external: VecDeque<Message>,
    capacity: usize,
}

impl PriorityInbox {
    /// Create an inbox with the default loopback capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOOPBACK_CAPACITY)
    }

    /// Create an inbox with a specific loopback capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        PriorityInbox {
            loopback: VecDeque::new(),
            external: VecDeque::new(),
            capacity,
        }
    }

    /// Enqueue a message received from the network.
    pub fn push_external(&mut self, message: Message) {
        self.external.push_back(message);
    }

    /// The next message to process: loopback first, then external.
    pub fn next(&mut self) -> Option<Message> {
        self.loopback.pop_front().or_else(|| self.external.pop_front())
    }

    /// Number of messages waiting on the loopback channel.
    pub fn loopback_len(&self) -> usize {
        self.loopback.len()
    }

    /// Number of messages waiting on the external channel.
    pub fn external_len(&self) -> usize {
        self.external.len()
    }

    /// Whether both channels are empty.
    pub fn is_empty(&self) -> bool {
        self.loopback.is_empty() && self.external.is_empty()
    }

    fn push_loopback(&mut self, message: Message) {
        // overflow means the processor emitted more self-messages than its
        // contract permits; no caller can handle that meaningfully
        assert!(
            self.loopback.len() < self.capacity,
            "loopback overflow (capacity: {})",
            self.capacity
        );
        self.loopback.push_back(message);
    }
}

impl Default for PriorityInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Looper for PriorityInbox {
    fn vote(&mut self, vote: Vote) {
        self.push_loopback(Message::Vote(vote));
    }

    fn proposal(&mut self, proposal: Proposal) {
        self.push_loopback(Message::Proposal(Box::new(proposal)));
    }
}
