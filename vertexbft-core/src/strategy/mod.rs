// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Reference role-selection strategies.

mod round_robin;

pub use round_robin::RoundRobin;
