// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end extraction tests

use anyhow::Result;
use roomscan::{run, ScanConfig, ScanError};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LAYOUT_CONFIG: &str = include_str!("../roomscan.toml");

/// Box corners, min and max inclusive
fn corners(min: [f64; 3], max: [f64; 3]) -> Vec<[f64; 3]> {
    let mut out = Vec::new();
    for &x in &[min[0], max[0]] {
        for &y in &[min[1], max[1]] {
            for &z in &[min[2], max[2]] {
                out.push([x, y, z]);
            }
        }
    }
    out
}

/// 4 m x 2.5 m x 6 m room (floor at y = -1.25, front wall at z = -3) with
/// two speaker cabinets and a sofa.
fn listening_room_obj() -> String {
    let mut vertices = corners([-2.0, -1.25, -3.0], [2.0, 1.25, 3.0]);
    vertices.extend(corners([-1.875, -0.625, -2.71875], [-1.5, -0.0625, -2.5]));
    vertices.extend(corners([1.5, -0.625, -2.71875], [1.8125, -0.0625, -2.5]));
    vertices.extend([
        [-0.5, -0.875, 1.5],
        [0.5, -0.875, 1.5],
        [-0.5, -0.875, 2.0],
        [0.5, -0.875, 2.0],
    ]);

    let mut obj = String::from("# synthetic listening room\no Room\n");
    for [x, y, z] in &vertices {
        writeln!(obj, "v {x} {y} {z}").unwrap();
    }
    obj.push_str("vn 0 1 0\nf 1 2 4 3\nf 5//1 6//1 8//1\n");
    obj
}

struct Workspace {
    _dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn workspace(obj: &str) -> Result<Workspace> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("scans").join("room.obj");
    fs::create_dir_all(input.parent().unwrap())?;
    fs::write(&input, obj)?;
    let output = dir.path().join("out").join("scan_analysis.json");
    Ok(Workspace {
        _dir: dir,
        input,
        output,
    })
}

fn layout_config(ws: &Workspace) -> Result<ScanConfig> {
    let mut config = ScanConfig::from_toml(LAYOUT_CONFIG, Path::new("roomscan.toml"))?;
    config.input_path = ws.input.clone();
    config.output_path = ws.output.clone();
    Ok(config)
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

#[test]
fn test_shipped_layout_config_is_valid() -> Result<()> {
    let config = ScanConfig::from_toml(LAYOUT_CONFIG, Path::new("roomscan.toml"))?;
    let names: Vec<&str> = config.regions.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "front_wall_area",
            "back_wall_area",
            "left_shelf",
            "right_shelf",
            "left_speaker",
            "right_speaker",
            "left_rack",
            "right_rack",
            "sofa_estimated",
            "floor",
            "ceiling",
        ]
    );
    Ok(())
}

#[test]
fn test_listening_room_measurements() -> Result<()> {
    let ws = workspace(&listening_room_obj())?;
    let mut config = layout_config(&ws)?;
    config.ear_height_offset_m = 0.5;

    let result = run(&config)?;

    assert_eq!(result.room.total_vertices, 28);
    assert_eq!(result.room.total_faces, 3);
    assert_eq!(result.room.dimensions_mm.width_x, 4000);
    assert_eq!(result.room.dimensions_mm.height_y, 2500);
    assert_eq!(result.room.dimensions_mm.depth_z, 6000);

    assert_eq!(result.region("left_speaker").unwrap().vertex_count, 8);
    assert_eq!(result.region("right_speaker").unwrap().vertex_count, 8);
    assert_eq!(result.region("sofa_estimated").unwrap().vertex_count, 4);
    assert_eq!(result.region("floor").unwrap().vertex_count, 4);
    assert!(result.region("left_shelf").unwrap().is_empty());

    let m = &result.measurements;
    let left = m.left_speaker.as_ref().unwrap();
    assert_eq!(left.from_left_wall_mm, Some(125));
    assert_eq!(left.from_front_wall_mm, 281);
    assert_eq!(left.tweeter_height_mm, 1187);
    assert_eq!(left.bottom_height_mm, 625);
    assert_eq!(left.width_mm, 375);
    assert_eq!(left.depth_mm, 218);
    assert_eq!(left.baffle_z_m, -2.5);

    let right = m.right_speaker.as_ref().unwrap();
    assert_eq!(right.from_right_wall_mm, Some(187));
    assert_eq!(right.width_mm, 312);

    assert_eq!(m.speaker_distance_mm, Some(3000));
    assert_eq!(m.speaker_center_distance_mm, Some(3343));
    assert!(m.left_shelf.is_none());
    assert!(m.left_rack.is_none());

    let lp = m.listening_point.as_ref().unwrap();
    assert_eq!(lp.from_front_wall_mm, 4750);
    assert_eq!(lp.seat_height_mm, 375);
    assert_eq!(lp.ear_height_estimated_mm, 875);
    assert_eq!(lp.from_speaker_center_mm, Some(4359));

    Ok(())
}

#[test]
fn test_output_document_shape() -> Result<()> {
    let ws = workspace(&listening_room_obj())?;
    run(&layout_config(&ws)?)?;

    let json = read_json(&ws.output)?;
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert!(keys.contains(&"room"));
    assert!(keys.contains(&"regions"));
    assert!(keys.contains(&"detailed_data"));

    let bbox = &json["room"]["bounding_box"];
    assert_eq!(bbox["min"]["x"], -2.0);
    assert_eq!(bbox["max"]["z"], 3.0);

    let regions = json["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 11);
    assert_eq!(regions[0]["name"], "front_wall_area");

    let shelf = &regions[2];
    assert_eq!(shelf["name"], "left_shelf");
    assert_eq!(shelf["vertex_count"], 0);
    assert!(shelf["bounds"].is_null());
    assert!(shelf["centroid"].is_null());

    let speaker = &regions[4];
    assert_eq!(speaker["centroid"]["x"], -1.6875);
    assert_eq!(speaker["sample_vertices"].as_array().unwrap().len(), 8);

    assert_eq!(json["measurements"]["speaker_distance_mm"], 3000);
    assert!(json["measurements"].get("left_shelf").is_none());
    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let ws = workspace(&listening_room_obj())?;
    let config = layout_config(&ws)?;

    run(&config)?;
    let first = fs::read(&ws.output)?;
    run(&config)?;
    let second = fs::read(&ws.output)?;

    assert_eq!(first, second);
    assert!(first.ends_with(b"}\n"));
    Ok(())
}

#[test]
fn test_existing_output_is_overwritten() -> Result<()> {
    let ws = workspace(&listening_room_obj())?;
    fs::create_dir_all(ws.output.parent().unwrap())?;
    fs::write(&ws.output, "stale content that is much longer than nothing")?;

    run(&layout_config(&ws)?)?;
    assert!(read_json(&ws.output).is_ok());
    Ok(())
}

#[test]
fn test_region_members_satisfy_rule_and_fit_room() -> Result<()> {
    let ws = workspace(&listening_room_obj())?;
    let result = run(&layout_config(&ws)?)?;

    let room = result.room.bounding_box;
    for region in &result.regions {
        if let Some(bounds) = region.bounds {
            assert!(room.contains_box(&bounds), "{} escapes the room", region.name);
        }
    }

    // Floor rule: strictly below 10 cm above the floor
    let floor = result.region("floor").unwrap().bounds.unwrap();
    assert!(floor.max.y < room.min.y + 0.1);
    Ok(())
}

#[test]
fn test_malformed_vertex_aborts_without_output() -> Result<()> {
    let ws = workspace("v 0 0 0\nv 1.0 2.0\nv 1 1 1\n")?;
    let err = run(&layout_config(&ws)?).unwrap_err();

    match &err {
        ScanError::Parse { line, .. } => assert_eq!(*line, 2),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_ne!(err.exit_code(), 0);
    assert!(!ws.output.exists());
    Ok(())
}

#[test]
fn test_no_vertices_aborts_without_output() -> Result<()> {
    let ws = workspace("# nothing scanned\n")?;
    let err = run(&layout_config(&ws)?).unwrap_err();

    assert!(matches!(err, ScanError::Load { .. }));
    assert_ne!(err.exit_code(), 0);
    assert!(!ws.output.exists());
    Ok(())
}

#[test]
fn test_unwritable_output_is_write_error() -> Result<()> {
    let ws = workspace(&listening_room_obj())?;
    let mut config = layout_config(&ws)?;
    // A directory cannot be replaced by the analysis file
    fs::create_dir_all(&ws.output)?;
    config.output_path = ws.output.clone();

    let err = run(&config).unwrap_err();
    assert!(matches!(err, ScanError::Write { .. }));
    assert_eq!(err.exit_code(), 5);
    Ok(())
}
