// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::analysis::AnalysisResult;
use colored::*;
use nalgebra::Point3;
use std::path::Path;

/// Titled block of report lines
pub struct Section {
    pub title: &'static str,
    pub lines: Vec<String>,
}

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report an analysis with colors
    pub fn report_analysis(result: &AnalysisResult, output: &Path) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Scan:".bold(), result.source.cyan());
        println!("{}", "━".repeat(80).bright_black());

        for section in Self::sections(result) {
            println!("\n{}", format!("{}:", section.title).bold());
            for line in &section.lines {
                if line.ends_with("empty") {
                    println!("  {}", line.yellow());
                } else {
                    println!("  {}", line);
                }
            }
        }

        println!("\n{}", "━".repeat(80).bright_black());
        Self::success(&format!("Analysis saved to {}", output.display()));
    }

    /// The report without colors, one entry per printed line
    pub fn summary_lines(result: &AnalysisResult) -> Vec<String> {
        let mut lines = vec![format!("Scan: {}", result.source)];
        for section in Self::sections(result) {
            lines.push(format!("{}:", section.title));
            lines.extend(section.lines.into_iter().map(|l| format!("  {l}")));
        }
        lines
    }

    pub fn sections(result: &AnalysisResult) -> Vec<Section> {
        let room = &result.room;
        let dims = &room.dimensions_mm;

        let mut sections = vec![Section {
            title: "Room",
            lines: vec![
                format!("Vertices: {}", room.total_vertices),
                format!("Faces: {}", room.total_faces),
                format!("Min: {} m", Self::format_point(&room.bounding_box.min)),
                format!("Max: {} m", Self::format_point(&room.bounding_box.max)),
                format!(
                    "Size: {}mm (W) x {}mm (D) x {}mm (H)",
                    dims.width_x, dims.depth_z, dims.height_y
                ),
            ],
        }];

        let width = result
            .regions
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(0);
        sections.push(Section {
            title: "Regions",
            lines: result
                .regions
                .iter()
                .map(|region| match (region.bounds, region.centroid, region.size_mm) {
                    (Some(bounds), Some(centroid), Some(size)) => format!(
                        "{:<width$}  {:>8} vertices  centroid {}  min {}  max {}  size {} x {} x {} mm",
                        region.name,
                        region.vertex_count,
                        Self::format_point(&centroid),
                        Self::format_point(&bounds.min),
                        Self::format_point(&bounds.max),
                        size.x_mm,
                        size.y_mm,
                        size.z_mm,
                    ),
                    _ => format!("{:<width$}  empty", region.name),
                })
                .collect(),
        });

        let measurements = Self::measurement_lines(result);
        if !measurements.is_empty() {
            sections.push(Section {
                title: "Measurements",
                lines: measurements,
            });
        }

        sections
    }

    fn measurement_lines(result: &AnalysisResult) -> Vec<String> {
        let m = &result.measurements;
        let mut lines = Vec::new();

        if let Some(d) = m.speaker_center_distance_mm {
            lines.push(format!("Speaker center distance: {d}mm"));
        }
        if let Some(d) = m.speaker_distance_mm {
            lines.push(format!("Speaker inner gap: {d}mm"));
        }
        if let Some(ls) = &m.left_speaker {
            lines.push(format!(
                "Left speaker: {}mm from left wall, tweeter at {}mm",
                ls.from_left_wall_mm.unwrap_or_default(),
                ls.tweeter_height_mm
            ));
        }
        if let Some(rs) = &m.right_speaker {
            lines.push(format!(
                "Right speaker: {}mm from right wall, tweeter at {}mm",
                rs.from_right_wall_mm.unwrap_or_default(),
                rs.tweeter_height_mm
            ));
        }
        if let Some(shelf) = &m.left_shelf {
            lines.push(format!("Left shelf: height {}mm", shelf.height_mm));
        }
        if let Some(shelf) = &m.right_shelf {
            lines.push(format!("Right shelf: height {}mm", shelf.height_mm));
        }
        if let Some(rack) = &m.left_rack {
            lines.push(format!("Left rack: depth {}mm from front wall", rack.depth_mm));
        }
        if let Some(rack) = &m.right_rack {
            lines.push(format!("Right rack: depth {}mm from front wall", rack.depth_mm));
        }
        if let Some(lp) = &m.listening_point {
            lines.push(format!(
                "Listening point: {}mm from front wall, ear height {}mm",
                lp.from_front_wall_mm, lp.ear_height_estimated_mm
            ));
        }

        lines
    }

    fn format_point(p: &Point3<f64>) -> String {
        format!("({:>8.3}, {:>8.3}, {:>8.3})", p.x, p.y, p.z)
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Print progress message
    pub fn progress(message: &str) {
        println!("{} {}...", "⏳".bright_blue(), message.bright_black());
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::ScanConfig;
    use crate::geometry::{Mesh, Vertex};

    fn result() -> AnalysisResult {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vertex::new(-1.5, 0.0, -2.0));
        mesh.add_vertex(Vertex::new(1.5, 2.5, 2.0));
        mesh.add_vertex(Vertex::new(0.0, 0.05, 0.0));
        analyze(&mesh, &ScanConfig::default(), Path::new("room.obj")).unwrap()
    }

    #[test]
    fn test_summary_layout() {
        let lines = Reporter::summary_lines(&result());

        assert_eq!(lines[0], "Scan: room.obj");
        assert_eq!(lines[1], "Room:");
        assert_eq!(lines[2], "  Vertices: 3");
        assert_eq!(lines[4], "  Min: (  -1.500,    0.000,   -2.000) m");
        assert_eq!(lines[6], "  Size: 3000mm (W) x 4000mm (D) x 2500mm (H)");
        assert_eq!(lines[7], "Regions:");
        assert!(lines[8].starts_with("  front_wall_area         1 vertices"));

        let floor = lines
            .iter()
            .find(|l| l.starts_with("  floor "))
            .expect("floor line");
        assert!(floor.contains("       2 vertices"));
        assert!(floor.contains("centroid (  -0.750,    0.025,   -1.000)"));
        assert!(floor.contains("min (  -1.500,    0.000,   -2.000)"));
        assert!(floor.contains("max (   0.000,    0.050,    0.000)"));
        assert!(floor.ends_with("size 1500 x 50 x 2000 mm"));
        // No furniture regions, so no measurement section
        assert!(!lines.iter().any(|l| l == "Measurements:"));
    }

    #[test]
    fn test_empty_region_line() {
        let mut config = ScanConfig::default();
        config.regions.push(crate::analysis::RegionRule::new("void").with(
            crate::geometry::Axis::X,
            crate::analysis::AxisRange::above(crate::analysis::Bound::absolute(10.0)),
        ));
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vertex::new(0.0, 0.0, 0.0));
        let result = analyze(&mesh, &config, Path::new("p.obj")).unwrap();

        let lines = Reporter::summary_lines(&result);
        assert!(lines.iter().any(|l| l.trim_start().starts_with("void") && l.ends_with("empty")));
    }
}
