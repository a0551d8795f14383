// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wavefront OBJ loader
//!
//! Only geometry records matter here: `v` lines become vertices and `f` lines
//! become triangles. Normals, texture coordinates, groups and material
//! statements are skipped. Parsing is fail-fast: the first malformed `v` or
//! `f` record aborts the load with its line number.

use crate::error::{ScanError, ScanResult};
use crate::geometry::{Mesh, Triangle, Vertex};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Face that references vertices defined further down the file. It is
/// checked and triangulated once all vertices are known.
struct PendingFace {
    line: usize,
    content: String,
    corners: Vec<usize>,
}

/// Load an OBJ file from disk
pub fn load_obj(path: impl AsRef<Path>) -> ScanResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ScanError::load(path, e.to_string()))?;
    let mesh = parse_obj(BufReader::new(file), path)?;

    info!(
        "OBJ parsed {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Parse OBJ records from a reader. `path` is only used for error context.
pub fn parse_obj<R: BufRead>(reader: R, path: &Path) -> ScanResult<Mesh> {
    let mut mesh = Mesh::new();
    let mut pending = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| ScanError::load(path, format!("line {line_no}: {e}")))?;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let vertex = parse_vertex(tokens)
                    .map_err(|reason| ScanError::parse(path, line_no, &line, reason))?;
                mesh.add_vertex(vertex);
            }
            Some("f") => {
                let corners = parse_face(tokens, mesh.vertex_count())
                    .map_err(|reason| ScanError::parse(path, line_no, &line, reason))?;
                if corners.iter().all(|&i| i < mesh.vertex_count()) {
                    add_polygon(&mut mesh, &corners);
                } else {
                    pending.push(PendingFace {
                        line: line_no,
                        content: line.trim().to_string(),
                        corners,
                    });
                }
            }
            _ => skipped += 1,
        }
    }

    debug!("skipped {} non-geometry lines", skipped);

    if mesh.is_empty() {
        return Err(ScanError::load(path, "no vertices found"));
    }

    let vertex_count = mesh.vertex_count();
    for face in pending {
        if let Some(&bad) = face.corners.iter().find(|&&i| i >= vertex_count) {
            return Err(ScanError::parse(
                path,
                face.line,
                &face.content,
                format!(
                    "vertex index {} out of range ({} vertices)",
                    bad + 1,
                    vertex_count
                ),
            ));
        }
        add_polygon(&mut mesh, &face.corners);
    }

    Ok(mesh)
}

/// Fan-triangulate a polygon of at least 3 corners
fn add_polygon(mesh: &mut Mesh, corners: &[usize]) {
    for pair in corners[1..].windows(2) {
        mesh.add_triangle(Triangle::new([corners[0], pair[0], pair[1]]));
    }
}

/// Parse the coordinates of a `v` record. Extra values after z (w or vertex
/// colours) are ignored.
fn parse_vertex<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<Vertex, String> {
    let values: Vec<&str> = tokens.collect();
    if values.len() < 3 {
        return Err(format!("expected 3 coordinates, found {}", values.len()));
    }

    let mut coords = [0.0f64; 3];
    for (slot, raw) in coords.iter_mut().zip(&values) {
        let value: f64 = raw
            .parse()
            .map_err(|_| format!("invalid coordinate `{raw}`"))?;
        if !value.is_finite() {
            return Err(format!("non-finite coordinate `{raw}`"));
        }
        *slot = value;
    }

    Ok(Vertex::new(coords[0], coords[1], coords[2]))
}

/// Parse an `f` record into zero-based vertex indices. Negative indices are
/// relative to the vertices read so far.
fn parse_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    vertices_so_far: usize,
) -> Result<Vec<usize>, String> {
    let mut corners = Vec::new();

    for token in tokens {
        // `v`, `v/vt`, `v//vn` and `v/vt/vn` all lead with the position index
        let raw = token.split('/').next().unwrap_or_default();
        let index: i64 = raw
            .parse()
            .map_err(|_| format!("invalid face index `{token}`"))?;

        let resolved = match index {
            0 => return Err("face index 0 is not valid".to_string()),
            i if i > 0 => (i - 1) as usize,
            i => {
                let back = i.unsigned_abs() as usize;
                if back > vertices_so_far {
                    return Err(format!("relative face index {i} precedes the first vertex"));
                }
                vertices_so_far - back
            }
        };
        corners.push(resolved);
    }

    if corners.len() < 3 {
        return Err(format!("face needs at least 3 vertices, found {}", corners.len()));
    }
    Ok(corners)
}
