// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use super::{Axis, Vertex};
use crate::utils::precision::serialize_point;
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// Axis-aligned bounding box of a non-empty point set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    #[serde(serialize_with = "serialize_point")]
    pub min: Point3<f64>,
    #[serde(serialize_with = "serialize_point")]
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Degenerate box around a single point
    pub fn from_point(point: &Point3<f64>) -> Self {
        Self {
            min: *point,
            max: *point,
        }
    }

    /// Per-axis min/max over all points, `None` when there are none
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bbox = Self::from_point(iter.next()?);
        for point in iter {
            bbox.expand_to_include(point);
        }
        Some(bbox)
    }

    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        Self::from_points(vertices.iter().map(|v| &v.position))
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Lower bound along an axis
    pub fn axis_min(&self, axis: Axis) -> f64 {
        self.min[axis.index()]
    }

    /// Upper bound along an axis
    pub fn axis_max(&self, axis: Axis) -> f64 {
        self.max[axis.index()]
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Inclusive containment test
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let i = axis.index();
            self.min[i] <= point[i] && point[i] <= self.max[i]
        })
    }

    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }
}
