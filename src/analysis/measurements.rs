// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Listening-room measurements derived from named regions
//!
//! Measurements are looked up by region name. A region that is missing from
//! the configuration, or matched no vertices, simply leaves its measurement
//! out of the result.

use super::stats::RegionStats;
use crate::geometry::{Axis, BoundingBox};
use crate::utils::precision::serialize_coord;
use crate::utils::to_millimetres;
use nalgebra::Point3;
use serde::Serialize;

pub const LEFT_SPEAKER: &str = "left_speaker";
pub const RIGHT_SPEAKER: &str = "right_speaker";
pub const LEFT_SHELF: &str = "left_shelf";
pub const RIGHT_SHELF: &str = "right_shelf";
pub const LEFT_RACK: &str = "left_rack";
pub const RIGHT_RACK: &str = "right_rack";
pub const SOFA: &str = "sofa_estimated";

/// Speaker placement relative to its side wall, the front wall and the floor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerPlacement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_left_wall_mm: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_right_wall_mm: Option<i64>,
    #[serde(serialize_with = "serialize_coord")]
    pub baffle_z_m: f64,
    pub from_front_wall_mm: i64,
    pub tweeter_height_mm: i64,
    pub bottom_height_mm: i64,
    pub width_mm: i64,
    pub depth_mm: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShelfMeasurement {
    pub height_mm: i64,
    pub depth_mm: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RackMeasurement {
    /// Distance from the front wall to the rack's front face
    pub depth_mm: i64,
    pub top_height_mm: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListeningPoint {
    pub from_front_wall_mm: i64,
    pub seat_height_mm: i64,
    pub ear_height_estimated_mm: i64,
    /// Horizontal (XZ) distance to the midpoint between the speakers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_speaker_center_mm: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Measurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_speaker: Option<SpeakerPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_speaker: Option<SpeakerPlacement>,
    /// Gap between the inner edges of the two speakers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_distance_mm: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_center_distance_mm: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_shelf: Option<ShelfMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_shelf: Option<ShelfMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_rack: Option<RackMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_rack: Option<RackMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listening_point: Option<ListeningPoint>,
}

impl Measurements {
    /// Derive measurements from region statistics.
    ///
    /// `ear_height_offset` is added to the sofa centroid height to estimate
    /// the listener's ear height.
    pub fn derive(regions: &[RegionStats], room: &BoundingBox, ear_height_offset: f64) -> Self {
        let find = |name: &str| {
            regions
                .iter()
                .find(|r| r.name == name)
                .and_then(|r| Some((r.bounds?, r.centroid?)))
        };

        let floor = room.axis_min(Axis::Y);
        let front = room.axis_min(Axis::Z);

        let left = find(LEFT_SPEAKER);
        let right = find(RIGHT_SPEAKER);

        let speaker = |bounds: &BoundingBox| SpeakerPlacement {
            from_left_wall_mm: None,
            from_right_wall_mm: None,
            baffle_z_m: bounds.max.z,
            from_front_wall_mm: to_millimetres((bounds.min.z - front).abs()),
            tweeter_height_mm: to_millimetres(bounds.max.y - floor),
            bottom_height_mm: to_millimetres(bounds.min.y - floor),
            width_mm: to_millimetres(bounds.max.x - bounds.min.x),
            depth_mm: to_millimetres(bounds.max.z - bounds.min.z),
        };

        let mut m = Measurements {
            left_speaker: left.map(|(b, _)| SpeakerPlacement {
                from_left_wall_mm: Some(to_millimetres((b.min.x - room.min.x).abs())),
                ..speaker(&b)
            }),
            right_speaker: right.map(|(b, _)| SpeakerPlacement {
                from_right_wall_mm: Some(to_millimetres((room.max.x - b.max.x).abs())),
                ..speaker(&b)
            }),
            ..Default::default()
        };

        let speaker_center = match (left, right) {
            (Some((lb, lc)), Some((rb, rc))) => {
                m.speaker_distance_mm = Some(to_millimetres((rb.min.x - lb.max.x).abs()));
                m.speaker_center_distance_mm = Some(to_millimetres((rc.x - lc.x).abs()));
                Some(nalgebra::center(&lc, &rc))
            }
            _ => None,
        };

        let shelf = |name: &str| {
            find(name).map(|(b, _)| ShelfMeasurement {
                height_mm: to_millimetres(b.max.y - floor),
                depth_mm: to_millimetres(b.max.z - b.min.z),
            })
        };
        m.left_shelf = shelf(LEFT_SHELF);
        m.right_shelf = shelf(RIGHT_SHELF);

        let rack = |name: &str| {
            find(name).map(|(b, _)| RackMeasurement {
                depth_mm: to_millimetres((b.max.z - front).abs()),
                top_height_mm: to_millimetres(b.max.y - floor),
            })
        };
        m.left_rack = rack(LEFT_RACK);
        m.right_rack = rack(RIGHT_RACK);

        m.listening_point = find(SOFA).map(|(_, seat)| ListeningPoint {
            from_front_wall_mm: to_millimetres((seat.z - front).abs()),
            seat_height_mm: to_millimetres(seat.y - floor),
            ear_height_estimated_mm: to_millimetres(seat.y - floor + ear_height_offset),
            from_speaker_center_mm: speaker_center.map(|c| to_millimetres(plan_distance(&seat, &c))),
        });

        m
    }

    pub fn is_empty(&self) -> bool {
        *self == Measurements::default()
    }
}

/// Distance in the floor plane, ignoring height
fn plan_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a.x - b.x).hypot(a.z - b.z)
}
