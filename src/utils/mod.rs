// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Numeric and serialization helpers

pub mod math;
pub mod precision;

pub use math::to_millimetres;
pub use precision::{round_coord, Coord, COORD_DECIMALS};
