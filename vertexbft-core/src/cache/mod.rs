// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Volatile message caching.

mod volatile;

pub use volatile::Volatile;
