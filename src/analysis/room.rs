// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Whole-room summary

use crate::geometry::{BoundingBox, Mesh};
use crate::utils::to_millimetres;
use serde::Serialize;

/// Room extents in whole millimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomDimensions {
    pub width_x: i64,
    pub height_y: i64,
    pub depth_z: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummary {
    pub total_vertices: usize,
    pub total_faces: usize,
    pub bounding_box: BoundingBox,
    pub dimensions_mm: RoomDimensions,
}

impl RoomSummary {
    pub fn new(mesh: &Mesh, bounding_box: BoundingBox) -> Self {
        let size = bounding_box.size();
        Self {
            total_vertices: mesh.vertex_count(),
            total_faces: mesh.triangle_count(),
            bounding_box,
            dimensions_mm: RoomDimensions {
                width_x: to_millimetres(size.x),
                height_y: to_millimetres(size.y),
                depth_z: to_millimetres(size.z),
            },
        }
    }
}
