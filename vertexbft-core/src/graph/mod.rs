// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Reference graph implementations.

mod chain;

pub use chain::Chain;
