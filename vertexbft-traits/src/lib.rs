// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! # vertexbft Consensus Traits
//!
//! This library defines the data model and the collaborator surfaces of the
//! vertexbft consensus core. The core itself (in `vertexbft-core`) is a
//! single-participant state machine that ingests proposals and votes and
//! drives a graph of vertices forward by height; everything it needs from
//! the outside world enters through the traits defined here.
//!
//! ## Overview
//!
//! - **Model**: [`Hash`], [`Vertex`]: value types with canonical identity
//!   hashing.
//! - **Messages**: [`Proposal`], [`Vote`], [`Quorum`], [`Message`].
//! - **Errors**: [`Error`], the attributable rejection taxonomy, classified
//!   by [`Attribution`]; [`VerifyError`] for signature failures.
//! - **Capabilities**: [`Graph`], [`Strategy`], [`Signer`], [`Verifier`],
//!   [`Builder`], [`Network`], [`Looper`], [`Cache`].
//!
//! All capability traits are synchronous: the core runs single-threaded
//! with no suspension points, and concurrency is the driver's concern.

pub mod builder;
pub mod cache;
pub mod crypto;
pub mod error;
pub mod graph;
pub mod looper;
pub mod message;
pub mod model;
pub mod network;
pub mod strategy;

// Re-export commonly used types at the crate root
pub use builder::Builder;
pub use cache::Cache;
pub use crypto::{Signer, Verifier, VerifyError};
pub use error::{Attribution, Error};
pub use graph::Graph;
pub use looper::Looper;
pub use message::{Proposal, Quorum, Vote};
pub use model::{Hash, Signature, Vertex};
pub use network::{Message, Network};
pub use strategy::Strategy;

/// Result type alias for processor operations.
pub type Result<T> = std::result::Result<T, Error>;
