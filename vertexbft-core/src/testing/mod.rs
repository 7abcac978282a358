// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Mock collaborators and fixtures for testing.
//!
//! The mock signer and verifier implement a real (keyless, deterministic)
//! signature scheme, so signature verification in tests has genuine
//! positive and negative cases instead of an always-true stub. The mock
//! graph, network, looper and builder record the calls made against them,
//! which is how the tests observe the processor's outbound effects.

pub mod fixtures;

mod mock_builder;
mod mock_crypto;
mod mock_graph;
mod mock_network;

pub use mock_builder::SequenceBuilder;
pub use mock_crypto::{sign, MockSigner, MockVerifier};
pub use mock_graph::MockGraph;
pub use mock_network::{RecordingLooper, RecordingNetwork};
