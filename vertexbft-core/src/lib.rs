// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! # vertexbft Consensus Core
//!
//! This library implements the vertexbft consensus processor: a
//! single-participant, event-driven state machine that ingests proposals
//! and votes, confirms and extends a graph of vertices, and emits new
//! proposals and votes through the collaborator surfaces defined in
//! `vertexbft-traits`.
//!
//! ## Architecture
//!
//! - [`processor`] - the state machine (`bootstrap` / `on_proposal` /
//!   `on_vote`)
//! - [`cache`] - the volatile per-height proposal and vote indices
//! - [`graph`] - a reference chain-shaped graph
//! - [`strategy`] - a reference round-robin role selection
//! - [`inbox`] - the driver's two-priority inbox, the reference looper
//! - [`testing`] - mock collaborators and fixtures for tests
//!
//! ## Usage
//!
//! The processor owns its eight collaborators; a driver feeds it one
//! message at a time and drains the inbox between dispatches, loopback
//! first:
//!
//! ```rust,no_run,ignore
//! let mut processor = Processor::new(
//!     network, graph, builder, strategy, signer, verifier, cache, inbox,
//! );
//! processor.bootstrap()?;
//! while let Some(message) = processor.looper_mut().next() {
//!     match message {
//!         Message::Proposal(proposal) => processor.on_proposal(&proposal)?,
//!         Message::Vote(vote) => processor.on_vote(&vote)?,
//!     }
//! }
//! ```

pub mod cache;
pub mod graph;
pub mod inbox;
pub mod processor;
pub mod strategy;
pub mod testing;

// Re-export commonly used types
pub use cache::Volatile;
pub use graph::Chain;
pub use inbox::PriorityInbox;
pub use processor::Processor;
pub use strategy::RoundRobin;
