// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Roomscan
//!
//! Extracts room geometry from a 3D room scan: the room bounding box,
//! statistics for configurable regions (floor, walls, speakers, furniture),
//! listening-room measurements derived from them, and a deterministic JSON
//! summary for layout documentation.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use analysis::{analyze, AnalysisResult};
pub use config::ScanConfig;
pub use error::{ScanError, ScanResult};
pub use geometry::{BoundingBox, Mesh, Vertex};

/// Load the configured mesh, analyze it and write the analysis file.
///
/// Nothing is written unless loading and analysis both succeed.
pub fn run(config: &ScanConfig) -> ScanResult<AnalysisResult> {
    let mesh = io::load_mesh(&config.input_path)?;
    let result = analyze(&mesh, config, &config.input_path)?;
    io::write_analysis(&result, &config.output_path)?;
    Ok(result)
}
