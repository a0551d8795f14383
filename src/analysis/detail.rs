// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Supplementary distributions used when reviewing a layout by hand:
//! per-axis histograms, a floor-plan density map and horizontal slices.

use crate::config::DetailConfig;
use crate::geometry::{Axis, BoundingBox, Vertex};
use crate::utils::precision::{serialize_coord, serialize_range};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    #[serde(serialize_with = "serialize_coord")]
    pub center_m: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histograms {
    pub x: Vec<HistogramBin>,
    pub y: Vec<HistogramBin>,
    pub z: Vec<HistogramBin>,
}

/// Occupied cell of the XZ (floor plan) grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCell {
    #[serde(serialize_with = "serialize_coord")]
    pub x_m: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub z_m: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanPoint {
    #[serde(serialize_with = "serialize_coord")]
    pub x_m: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub z_m: f64,
}

/// Thin horizontal band of vertices at a height above the floor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizontalSlice {
    #[serde(serialize_with = "serialize_coord")]
    pub height_above_floor_m: f64,
    pub vertex_count: usize,
    #[serde(serialize_with = "serialize_range")]
    pub x_range_m: [f64; 2],
    #[serde(serialize_with = "serialize_range")]
    pub z_range_m: [f64; 2],
    pub sample_points: Vec<PlanPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailData {
    pub histograms: Histograms,
    pub xz_density_map: Vec<DensityCell>,
    pub horizontal_slices: Vec<HorizontalSlice>,
}

impl DetailData {
    pub fn compute(vertices: &[Vertex], room: &BoundingBox, config: &DetailConfig) -> Self {
        let bins = &config.histogram_bins;
        Self {
            histograms: Histograms {
                x: histogram(vertices, Axis::X, bins.x),
                y: histogram(vertices, Axis::Y, bins.y),
                z: histogram(vertices, Axis::Z, bins.z),
            },
            xz_density_map: density_map(vertices, room, config.density_grid_m),
            horizontal_slices: config
                .slice_heights_m
                .iter()
                .filter_map(|&h| {
                    horizontal_slice(
                        vertices,
                        room,
                        h,
                        config.slice_thickness_m,
                        config.slice_sample_limit,
                    )
                })
                .collect(),
        }
    }
}

/// Equal-width histogram over the data range, last bin closed on the right.
/// A zero-width range is widened by half a metre on each side.
pub fn histogram(vertices: &[Vertex], axis: Axis, bins: usize) -> Vec<HistogramBin> {
    if vertices.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = vertices.iter().map(|v| v.coord(axis)).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), c| (lo.min(c), hi.max(c)),
    );
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in vertices {
        let slot = ((v.coord(axis) - lo) / width) as usize;
        counts[slot.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            center_m: lo + (i as f64 + 0.5) * width,
            count,
        })
        .collect()
}

/// Vertex counts on a square XZ grid anchored at the room's left/front
/// corner. Only occupied cells are listed, ordered by x cell then z cell.
pub fn density_map(vertices: &[Vertex], room: &BoundingBox, grid: f64) -> Vec<DensityCell> {
    let (x0, z0) = (room.axis_min(Axis::X), room.axis_min(Axis::Z));
    let size = room.size();
    let cells_x = (size.x / grid).floor() as usize + 1;
    let cells_z = (size.z / grid).floor() as usize + 1;

    let mut cells: BTreeMap<(usize, usize), usize> = BTreeMap::new();
    for v in vertices {
        let i = (((v.position.x - x0) / grid).floor() as usize).min(cells_x - 1);
        let j = (((v.position.z - z0) / grid).floor() as usize).min(cells_z - 1);
        *cells.entry((i, j)).or_default() += 1;
    }

    cells
        .into_iter()
        .map(|((i, j), count)| DensityCell {
            x_m: x0 + (i as f64 + 0.5) * grid,
            z_m: z0 + (j as f64 + 0.5) * grid,
            count,
        })
        .collect()
}

/// Vertices strictly within `thickness / 2` of `floor + height`, or `None`
/// when the band is empty.
pub fn horizontal_slice(
    vertices: &[Vertex],
    room: &BoundingBox,
    height: f64,
    thickness: f64,
    sample_limit: usize,
) -> Option<HorizontalSlice> {
    let level = room.axis_min(Axis::Y) + height;
    let half = thickness / 2.0;
    let band: Vec<&Vertex> = vertices
        .iter()
        .filter(|v| {
            let y = v.position.y;
            level - half < y && y < level + half
        })
        .collect();

    let bbox = BoundingBox::from_points(band.iter().map(|v| &v.position))?;
    let step = (band.len() / sample_limit.max(1)).max(1);

    Some(HorizontalSlice {
        height_above_floor_m: height,
        vertex_count: band.len(),
        x_range_m: [bbox.min.x, bbox.max.x],
        z_range_m: [bbox.min.z, bbox.max.z],
        sample_points: band
            .iter()
            .step_by(step)
            .map(|v| PlanPoint {
                x_m: v.position.x,
                z_m: v.position.z,
            })
            .collect(),
    })
}
