// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Region rules
//!
//! A region is a named list of per-axis open ranges. Range limits are written
//! relative to the room (for example "10 cm above the floor") and resolved to
//! absolute coordinates once the room bounding box is known.

use crate::geometry::{Axis, BoundingBox, Vertex};
use serde::{Deserialize, Serialize};

/// Reference coordinate a [`Bound`] is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    /// Scan origin, i.e. an absolute coordinate
    #[default]
    #[serde(rename = "origin")]
    Origin,
    #[serde(rename = "left", alias = "x_min")]
    XMin,
    #[serde(rename = "right", alias = "x_max")]
    XMax,
    #[serde(rename = "floor", alias = "y_min")]
    YMin,
    #[serde(rename = "ceiling", alias = "y_max")]
    YMax,
    #[serde(rename = "front", alias = "z_min")]
    ZMin,
    #[serde(rename = "back", alias = "z_max")]
    ZMax,
}

impl Anchor {
    pub fn resolve(self, room: &BoundingBox) -> f64 {
        match self {
            Anchor::Origin => 0.0,
            Anchor::XMin => room.axis_min(Axis::X),
            Anchor::XMax => room.axis_max(Axis::X),
            Anchor::YMin => room.axis_min(Axis::Y),
            Anchor::YMax => room.axis_max(Axis::Y),
            Anchor::ZMin => room.axis_min(Axis::Z),
            Anchor::ZMax => room.axis_max(Axis::Z),
        }
    }
}

/// `anchor + offset`, in metres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bound {
    #[serde(default)]
    pub from: Anchor,
    #[serde(default)]
    pub offset: f64,
}

impl Bound {
    pub fn at(from: Anchor, offset: f64) -> Self {
        Self { from, offset }
    }

    pub fn absolute(value: f64) -> Self {
        Self::at(Anchor::Origin, value)
    }

    pub fn resolve(&self, room: &BoundingBox) -> f64 {
        self.from.resolve(room) + self.offset
    }
}

/// Open interval along one axis. Missing limits are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<Bound>,
}

impl AxisRange {
    pub fn between(above: Bound, below: Bound) -> Self {
        Self {
            above: Some(above),
            below: Some(below),
        }
    }

    pub fn above(bound: Bound) -> Self {
        Self {
            above: Some(bound),
            below: None,
        }
    }

    pub fn below(bound: Bound) -> Self {
        Self {
            above: None,
            below: Some(bound),
        }
    }

    fn resolve(&self, room: &BoundingBox) -> (f64, f64) {
        (
            self.above
                .map_or(f64::NEG_INFINITY, |b| b.resolve(room)),
            self.below.map_or(f64::INFINITY, |b| b.resolve(room)),
        )
    }

    fn bounds(&self) -> impl Iterator<Item = &Bound> {
        self.above.iter().chain(self.below.iter())
    }
}

/// Named region predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionRule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<AxisRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<AxisRange>,
}

impl RegionRule {
    /// Rule without constraints; matches every vertex until ranges are added
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x: None,
            y: None,
            z: None,
        }
    }

    pub fn with(mut self, axis: Axis, range: AxisRange) -> Self {
        *self.range_mut(axis) = Some(range);
        self
    }

    pub fn range(&self, axis: Axis) -> Option<&AxisRange> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
            Axis::Z => self.z.as_ref(),
        }
    }

    fn range_mut(&mut self, axis: Axis) -> &mut Option<AxisRange> {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    /// Every offset this rule uses
    pub fn offsets(&self) -> impl Iterator<Item = f64> + '_ {
        Axis::ALL
            .into_iter()
            .filter_map(move |axis| self.range(axis))
            .flat_map(|range| range.bounds().map(|b| b.offset))
    }

    /// Fix the rule's limits against a room bounding box
    pub fn resolve(&self, room: &BoundingBox) -> ResolvedRule {
        let mut limits = [(f64::NEG_INFINITY, f64::INFINITY); 3];
        for axis in Axis::ALL {
            if let Some(range) = self.range(axis) {
                limits[axis.index()] = range.resolve(room);
            }
        }
        ResolvedRule {
            name: self.name.clone(),
            limits,
        }
    }
}

/// Region rule with absolute `(above, below)` limits per axis
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRule {
    pub name: String,
    pub limits: [(f64, f64); 3],
}

impl ResolvedRule {
    /// Strictly inside every axis interval
    #[inline]
    pub fn matches(&self, vertex: &Vertex) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let (lo, hi) = self.limits[axis.index()];
            let v = vertex.coord(axis);
            lo < v && v < hi
        })
    }

    /// True when some axis interval is empty, so nothing can match
    pub fn is_unsatisfiable(&self) -> bool {
        self.limits.iter().any(|&(lo, hi)| lo >= hi)
    }
}
