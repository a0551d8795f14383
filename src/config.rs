// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Extraction configuration

use crate::analysis::region::{Anchor, AxisRange, Bound, RegionRule};
use crate::error::{ScanError, ScanResult};
use crate::geometry::Axis;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "roomscan.toml";
pub const DEFAULT_INPUT: &str = "room/scans/room.obj";
pub const DEFAULT_OUTPUT: &str = "room/scan_analysis.json";

/// Bin counts for the per-axis histograms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistogramBins {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Default for HistogramBins {
    fn default() -> Self {
        Self { x: 30, y: 30, z: 40 }
    }
}

/// Settings for the optional `detailed_data` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetailConfig {
    /// Emit histograms, density map, slices and region samples
    pub enabled: bool,
    /// Sample vertices kept per region
    pub sample_count: usize,
    /// Floor-plan grid cell size in metres
    pub density_grid_m: f64,
    /// Slice heights above the floor in metres
    pub slice_heights_m: Vec<f64>,
    pub slice_thickness_m: f64,
    /// Upper bound on sample points per slice
    pub slice_sample_limit: usize,
    pub histogram_bins: HistogramBins,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_count: 30,
            density_grid_m: 0.1,
            slice_heights_m: vec![0.5, 1.0, 1.5],
            slice_thickness_m: 0.1,
            slice_sample_limit: 50,
            histogram_bins: HistogramBins::default(),
        }
    }
}

/// Scan extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Mesh file to analyze
    pub input_path: PathBuf,
    /// Analysis JSON destination, overwritten on every run
    pub output_path: PathBuf,
    /// Seated ear height above the sofa centroid, in metres
    pub ear_height_offset_m: f64,
    pub detail: DetailConfig,
    /// Region rules, reported in this order
    pub regions: Vec<RegionRule>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            ear_height_offset_m: 0.45,
            detail: DetailConfig::default(),
            regions: default_regions(),
        }
    }
}

/// Room structure rules that hold for any scan. Furniture rules depend on the
/// room and belong in a configuration file.
pub fn default_regions() -> Vec<RegionRule> {
    vec![
        RegionRule::new("front_wall_area")
            .with(Axis::Z, AxisRange::below(Bound::at(Anchor::ZMin, 0.5))),
        RegionRule::new("back_wall_area")
            .with(Axis::Z, AxisRange::above(Bound::at(Anchor::ZMax, -0.5))),
        RegionRule::new("floor").with(Axis::Y, AxisRange::below(Bound::at(Anchor::YMin, 0.1))),
        RegionRule::new("ceiling")
            .with(Axis::Y, AxisRange::above(Bound::at(Anchor::YMax, -0.1))),
    ]
}

impl ScanConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> ScanResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScanError::config(path, e.to_string()))?;
        Self::from_toml(&content, path)
    }

    /// Parse and validate TOML; `origin` is only used in error messages
    pub fn from_toml(content: &str, origin: &Path) -> ScanResult<Self> {
        let config: ScanConfig =
            toml::from_str(content).map_err(|e| ScanError::config(origin, e.to_string()))?;
        config.validate().map_err(|reason| ScanError::config(origin, reason))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// An explicit path must exist. Without one, `roomscan.toml` in the working
    /// directory is used when present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> ScanResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `ROOMSCAN_INPUT`, `ROOMSCAN_OUTPUT` and `ROOMSCAN_DETAIL`
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ScanResult<()> {
        if let Some(input) = lookup("ROOMSCAN_INPUT") {
            self.input_path = PathBuf::from(input);
        }

        if let Some(output) = lookup("ROOMSCAN_OUTPUT") {
            self.output_path = PathBuf::from(output);
        }

        if let Some(detail) = lookup("ROOMSCAN_DETAIL") {
            self.detail.enabled = detail.parse().map_err(|_| {
                ScanError::config(
                    "ROOMSCAN_DETAIL",
                    format!("expected `true` or `false`, got `{detail}`"),
                )
            })?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> ScanResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| ScanError::config(path, format!("failed to serialize: {e}")))?;
        std::fs::write(path, content).map_err(|source| ScanError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check rule names and numeric settings
    pub fn validate(&self) -> Result<(), String> {
        if !self.ear_height_offset_m.is_finite() {
            return Err("ear_height_offset_m must be finite".to_string());
        }

        let mut seen = HashSet::new();
        for rule in &self.regions {
            if rule.name.trim().is_empty() {
                return Err("region names must not be empty".to_string());
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(format!("duplicate region `{}`", rule.name));
            }
            if rule.offsets().any(|o| !o.is_finite()) {
                return Err(format!("region `{}` has a non-finite offset", rule.name));
            }
        }

        let detail = &self.detail;
        if !(detail.density_grid_m.is_finite() && detail.density_grid_m > 0.0) {
            return Err("detail.density_grid_m must be positive".to_string());
        }
        if !(detail.slice_thickness_m.is_finite() && detail.slice_thickness_m > 0.0) {
            return Err("detail.slice_thickness_m must be positive".to_string());
        }
        if detail.slice_heights_m.iter().any(|h| !h.is_finite()) {
            return Err("detail.slice_heights_m must be finite".to_string());
        }
        let bins = &detail.histogram_bins;
        if bins.x == 0 || bins.y == 0 || bins.z == 0 {
            return Err("detail.histogram_bins must be at least 1 per axis".to_string());
        }

        Ok(())
    }
}
