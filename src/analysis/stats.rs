// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-region coordinate statistics

use super::region::ResolvedRule;
use crate::geometry::{BoundingBox, Vertex};
use crate::utils::precision::{serialize_opt_point, Coord};
use crate::utils::to_millimetres;
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// Box extent in whole millimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeMm {
    pub x_mm: i64,
    pub y_mm: i64,
    pub z_mm: i64,
}

impl SizeMm {
    pub fn of(bbox: &BoundingBox) -> Self {
        let size = bbox.size();
        Self {
            x_mm: to_millimetres(size.x),
            y_mm: to_millimetres(size.y),
            z_mm: to_millimetres(size.z),
        }
    }
}

/// Statistics for one region. An empty region keeps its name and a zero
/// count; `bounds`, `centroid` and `size_mm` are then `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    pub name: String,
    pub vertex_count: usize,
    pub bounds: Option<BoundingBox>,
    #[serde(serialize_with = "serialize_opt_point")]
    pub centroid: Option<Point3<f64>>,
    pub size_mm: Option<SizeMm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_vertices: Option<Vec<Coord>>,
}

impl RegionStats {
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}

/// Collect the vertices matching `rule` and summarize them.
///
/// `sample_count` adds up to that many evenly spaced member vertices.
pub fn region_stats(
    rule: &ResolvedRule,
    vertices: &[Vertex],
    sample_count: Option<usize>,
) -> RegionStats {
    let members: Vec<&Vertex> = vertices.iter().filter(|v| rule.matches(v)).collect();

    let bounds = BoundingBox::from_points(members.iter().map(|v| &v.position));
    let centroid = centroid(&members);
    let sample_vertices = match sample_count {
        Some(limit) if !members.is_empty() => Some(
            sample_indices(members.len(), limit)
                .into_iter()
                .map(|i| Coord(members[i].position))
                .collect(),
        ),
        _ => None,
    };

    RegionStats {
        name: rule.name.clone(),
        vertex_count: members.len(),
        size_mm: bounds.as_ref().map(SizeMm::of),
        bounds,
        centroid,
        sample_vertices,
    }
}

/// Arithmetic mean position, `None` for an empty set
pub fn centroid(vertices: &[&Vertex]) -> Option<Point3<f64>> {
    if vertices.is_empty() {
        return None;
    }
    let sum = vertices
        .iter()
        .fold(Vector3::zeros(), |acc, v| acc + v.position.coords);
    Some(Point3::from(sum / vertices.len() as f64))
}

/// Up to `limit` indices spread evenly over `0..len`, first and last included
pub fn sample_indices(len: usize, limit: usize) -> Vec<usize> {
    let count = limit.min(len);
    match count {
        0 => Vec::new(),
        1 => vec![0],
        _ => (0..count)
            .map(|i| (i as f64 * (len - 1) as f64 / (count - 1) as f64) as usize)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::region::{AxisRange, Bound, RegionRule};
    use crate::geometry::Axis;
    use approx::assert_relative_eq;

    fn unit_room() -> BoundingBox {
        BoundingBox::new(Point3::new(-10.0, -10.0, -10.0), Point3::new(10.0, 10.0, 10.0))
    }

    #[test]
    fn test_centroid_of_two_points() {
        let a = Vertex::new(0.0, 0.0, 0.0);
        let b = Vertex::new(2.0, 0.0, 0.0);
        assert_eq!(centroid(&[&a, &b]), Some(Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn test_region_members_satisfy_rule() {
        let vertices: Vec<Vertex> = (0..100)
            .map(|i| {
                let t = i as f64 * 0.1;
                Vertex::new(t.sin() * 5.0, t - 5.0, t.cos() * 5.0)
            })
            .collect();
        let rule = RegionRule::new("low")
            .with(Axis::Y, AxisRange::below(Bound::absolute(0.0)))
            .resolve(&unit_room());

        let stats = region_stats(&rule, &vertices, None);
        let expected = vertices.iter().filter(|v| v.position.y < 0.0).count();
        assert_eq!(stats.vertex_count, expected);

        let bounds = stats.bounds.unwrap();
        assert!(bounds.max.y < 0.0);
        let room = BoundingBox::from_vertices(&vertices).unwrap();
        assert!(room.contains_box(&bounds));
    }

    #[test]
    fn test_empty_region_is_well_defined() {
        let vertices = vec![Vertex::new(0.0, 0.0, 0.0)];
        let rule = RegionRule::new("nothing")
            .with(Axis::X, AxisRange::above(Bound::absolute(5.0)))
            .resolve(&unit_room());

        let stats = region_stats(&rule, &vertices, Some(30));
        assert!(stats.is_empty());
        assert_eq!(stats.name, "nothing");
        assert!(stats.bounds.is_none());
        assert!(stats.centroid.is_none());
        assert!(stats.size_mm.is_none());
        assert!(stats.sample_vertices.is_none());

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["bounds"].is_null());
        assert!(json["centroid"].is_null());
    }

    #[test]
    fn test_size_and_centroid() {
        let vertices = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(0.38, 0.58, 0.27),
            Vertex::new(0.2, 0.1, 0.1),
        ];
        let rule = RegionRule::new("speaker").resolve(&unit_room());
        let stats = region_stats(&rule, &vertices, None);

        let size = stats.size_mm.unwrap();
        assert_eq!((size.x_mm, size.y_mm, size.z_mm), (380, 580, 270));
        let c = stats.centroid.unwrap();
        assert_relative_eq!(c.x, 0.58 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.68 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_indices() {
        assert_eq!(sample_indices(0, 30), Vec::<usize>::new());
        assert_eq!(sample_indices(1, 30), vec![0]);
        assert_eq!(sample_indices(5, 30), vec![0, 1, 2, 3, 4]);
        assert_eq!(sample_indices(10, 4), vec![0, 3, 6, 9]);
        assert_eq!(sample_indices(100, 0), Vec::<usize>::new());
    }
}
