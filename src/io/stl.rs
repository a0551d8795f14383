// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL loader (ASCII or binary)

use crate::error::{ScanError, ScanResult};
use crate::geometry::{Mesh, Triangle, Vertex};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use stl_io::read_stl;
use tracing::info;

/// Load an STL file into a mesh. `stl_io` already deduplicates shared
/// corners, so vertex statistics are not skewed by facet repetition.
pub fn load_stl(path: impl AsRef<Path>) -> ScanResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ScanError::load(path, e.to_string()))?;
    let mut reader = BufReader::new(file);

    let stl = read_stl(&mut reader)
        .map_err(|e| ScanError::load(path, format!("invalid STL: {e}")))?;

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());
    for (i, v) in stl.vertices.iter().enumerate() {
        let (x, y, z) = (f64::from(v[0]), f64::from(v[1]), f64::from(v[2]));
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(ScanError::load(path, format!("non-finite vertex #{i}")));
        }
        mesh.add_vertex(Vertex::new(x, y, z));
    }
    for face in &stl.faces {
        mesh.add_triangle(Triangle::new(face.vertices));
    }

    if mesh.is_empty() {
        return Err(ScanError::load(path, "no vertices found"));
    }

    info!(
        "STL parsed {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
