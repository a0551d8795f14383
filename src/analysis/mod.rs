// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scan analysis: room frame, region statistics and derived measurements

pub mod detail;
pub mod measurements;
pub mod region;
pub mod room;
pub mod stats;

pub use detail::DetailData;
pub use measurements::Measurements;
pub use region::{Anchor, AxisRange, Bound, RegionRule, ResolvedRule};
pub use room::{RoomDimensions, RoomSummary};
pub use stats::{region_stats, RegionStats, SizeMm};

use crate::config::ScanConfig;
use crate::error::{ScanError, ScanResult};
use crate::geometry::Mesh;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Fixed description of the scan axes, written into every result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateSystem {
    pub x: &'static str,
    pub y: &'static str,
    pub z: &'static str,
    pub unit: &'static str,
}

pub const COORDINATE_SYSTEM: CoordinateSystem = CoordinateSystem {
    x: "width (left wall negative, right wall positive)",
    y: "height (floor negative, ceiling positive)",
    z: "depth (front wall negative, back wall positive)",
    unit: "m",
};

/// Complete output of one extraction run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub source: String,
    pub coordinate_system: CoordinateSystem,
    pub room: RoomSummary,
    pub regions: Vec<RegionStats>,
    pub measurements: Measurements,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_data: Option<DetailData>,
}

impl AnalysisResult {
    pub fn region(&self, name: &str) -> Option<&RegionStats> {
        self.regions.iter().find(|r| r.name == name)
    }
}

/// Analyze a loaded mesh. `source` is recorded in the result as given.
pub fn analyze(mesh: &Mesh, config: &ScanConfig, source: &Path) -> ScanResult<AnalysisResult> {
    let bbox = mesh
        .bounding_box()
        .ok_or_else(|| ScanError::load(source, "no vertices found"))?;

    let room = RoomSummary::new(mesh, bbox);
    let sample_count = config.detail.enabled.then_some(config.detail.sample_count);

    let regions: Vec<RegionStats> = config
        .regions
        .iter()
        .map(|rule| {
            let resolved = rule.resolve(&bbox);
            debug!(region = %resolved.name, limits = ?resolved.limits, "resolved region rule");
            if resolved.is_unsatisfiable() {
                warn!("region `{}` has an empty range on some axis", resolved.name);
            }

            let stats = region_stats(&resolved, &mesh.vertices, sample_count);
            if stats.is_empty() {
                debug!("region `{}` matched no vertices", stats.name);
            }
            stats
        })
        .collect();

    let measurements = Measurements::derive(&regions, &bbox, config.ear_height_offset_m);
    let detailed_data = config
        .detail
        .enabled
        .then(|| DetailData::compute(&mesh.vertices, &bbox, &config.detail));

    Ok(AnalysisResult {
        source: source.display().to_string(),
        coordinate_system: COORDINATE_SYSTEM,
        room,
        regions,
        measurements,
        detailed_data,
    })
}
