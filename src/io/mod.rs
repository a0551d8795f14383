// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - mesh loading and analysis output

mod obj;
mod stl;
mod writer;

pub use obj::{load_obj, parse_obj};
pub use stl::load_stl;
pub use writer::{to_json, write_analysis};

use crate::error::{ScanError, ScanResult};
use crate::geometry::Mesh;
use std::path::Path;

/// Load a scan mesh, choosing the parser from the file extension
pub fn load_mesh(path: impl AsRef<Path>) -> ScanResult<Mesh> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "obj" => load_obj(path),
        "stl" => load_stl(path),
        other => Err(ScanError::load(
            path,
            format!("unsupported mesh format `.{other}` (expected .obj or .stl)"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extension_is_load_error() {
        let err = load_mesh("room/scans/room.glb").unwrap_err();
        assert!(matches!(err, ScanError::Load { .. }));
        assert!(err.to_string().contains(".glb"));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        // Missing file, but dispatched to the OBJ loader rather than rejected
        let err = load_mesh("missing/ROOM.OBJ").unwrap_err();
        assert!(!err.to_string().contains("unsupported"));
    }
}
