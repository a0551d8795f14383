// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - scan mesh representation and bounding boxes

mod axis;
mod bbox;
mod mesh;

pub use axis::Axis;
pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle, Vertex};
