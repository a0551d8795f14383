// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Fixed-precision serializers for coordinates
//!
//! All coordinates written to the analysis file go through these helpers so
//! repeated runs over the same scan produce identical bytes.

use nalgebra::Point3;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Decimal places kept for coordinates in metres (micrometre resolution).
pub const COORD_DECIMALS: u32 = 6;

/// Round a coordinate to [`COORD_DECIMALS`] places
pub fn round_coord(value: f64) -> f64 {
    super::math::round_to(value, COORD_DECIMALS)
}

/// Point wrapper that serializes through [`serialize_point`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord(pub Point3<f64>);

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_point(&self.0, serializer)
    }
}

pub fn serialize_coord<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(round_coord(*value))
}

/// Serialize a point as `{"x": .., "y": .., "z": ..}`
pub fn serialize_point<S>(point: &Point3<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut state = serializer.serialize_struct("Point", 3)?;
    state.serialize_field("x", &round_coord(point.x))?;
    state.serialize_field("y", &round_coord(point.y))?;
    state.serialize_field("z", &round_coord(point.z))?;
    state.end()
}

pub fn serialize_opt_point<S>(
    point: &Option<Point3<f64>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match point {
        Some(p) => serialize_point(p, serializer),
        None => serializer.serialize_none(),
    }
}

/// Serialize a `[lo, hi]` pair
pub fn serialize_range<S>(range: &[f64; 2], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeTuple;
    let mut tuple = serializer.serialize_tuple(2)?;
    tuple.serialize_element(&round_coord(range[0]))?;
    tuple.serialize_element(&round_coord(range[1]))?;
    tuple.end()
}
