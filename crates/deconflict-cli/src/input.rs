//! Mission file ingestion.
//!
//! An airspace file names one primary mission, the other planned missions
//! and optionally the safety buffer. Each mission can be written in one of
//! three forms:
//!
//! - absolute: `{ "owner_id", "waypoints": [{ "x", "y", "z", "t" }] }`
//! - offset: `{ "owner_id", "departure_time": RFC3339, "waypoints": [{ "x", "y", "z", "time_offset_s" }] }`
//! - window: `{ "owner_id", "start_time", "end_time", "waypoints": [{ "x", "y", "z" }] }`

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use deconflict_core::{Mission, Position, Waypoint};
use serde::Deserialize;

/// Waypoint timed relative to a departure instant.
#[derive(Debug, Clone, Deserialize)]
pub struct OffsetWaypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(alias = "time_offset")]
    pub time_offset_s: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MissionFile {
    Offset {
        owner_id: String,
        departure_time: DateTime<Utc>,
        waypoints: Vec<OffsetWaypoint>,
    },
    Window {
        owner_id: String,
        start_time: f64,
        end_time: f64,
        waypoints: Vec<Position>,
    },
    Absolute {
        owner_id: String,
        waypoints: Vec<Waypoint>,
    },
}

impl MissionFile {
    pub fn into_mission(self) -> Mission {
        match self {
            MissionFile::Offset {
                owner_id,
                departure_time,
                waypoints,
            } => {
                let base_time = departure_time.timestamp_millis() as f64 / 1000.0;
                let waypoints = waypoints
                    .into_iter()
                    .map(|wp| Waypoint::new(wp.x, wp.y, wp.z, base_time + wp.time_offset_s))
                    .collect();
                Mission::new(owner_id, waypoints)
            }
            MissionFile::Window {
                owner_id,
                start_time,
                end_time,
                waypoints,
            } => Mission::from_time_window(owner_id, &waypoints, start_time, end_time),
            MissionFile::Absolute {
                owner_id,
                waypoints,
            } => Mission::new(owner_id, waypoints),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirspaceFile {
    pub primary: MissionFile,
    #[serde(default)]
    pub others: Vec<MissionFile>,
    #[serde(default)]
    pub buffer_m: Option<f64>,
}

/// Missions ready for the engine.
#[derive(Debug, Clone)]
pub struct Airspace {
    pub primary: Mission,
    pub others: Vec<Mission>,
    pub buffer_m: Option<f64>,
}

impl From<AirspaceFile> for Airspace {
    fn from(file: AirspaceFile) -> Self {
        Self {
            primary: file.primary.into_mission(),
            others: file
                .others
                .into_iter()
                .map(MissionFile::into_mission)
                .collect(),
            buffer_m: file.buffer_m,
        }
    }
}

pub fn parse_airspace(json: &str) -> Result<Airspace> {
    let file: AirspaceFile =
        serde_json::from_str(json).context("Airspace file is not valid mission JSON")?;
    Ok(file.into())
}

pub fn load_airspace(path: &Path) -> Result<Airspace> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read airspace file {}", path.display()))?;
    parse_airspace(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_form() {
        let airspace = parse_airspace(
            r#"{
                "primary": {
                    "owner_id": "PRIMARY-001",
                    "waypoints": [
                        {"x": 0, "y": 0, "z": 100, "t": 0},
                        {"x": 500, "y": 0, "z": 100, "t": 50}
                    ]
                },
                "buffer_m": 30
            }"#,
        )
        .unwrap();
        assert_eq!(airspace.primary.owner_id, "PRIMARY-001");
        assert_eq!(airspace.primary.waypoints[1], Waypoint::new(500.0, 0.0, 100.0, 50.0));
        assert!(airspace.others.is_empty());
        assert_eq!(airspace.buffer_m, Some(30.0));
    }

    #[test]
    fn test_window_form_assigns_times() {
        let airspace = parse_airspace(
            r#"{
                "primary": {
                    "owner_id": "P",
                    "start_time": 10,
                    "end_time": 30,
                    "waypoints": [{"x": 0, "y": 0, "z": 0}, {"x": 100, "y": 0, "z": 0}]
                }
            }"#,
        )
        .unwrap();
        let times: Vec<f64> = airspace.primary.waypoints.iter().map(|w| w.t).collect();
        assert_eq!(times, vec![10.0, 30.0]);
    }

    #[test]
    fn test_offset_form_uses_departure_epoch() {
        let airspace = parse_airspace(
            r#"{
                "primary": {"owner_id": "P", "start_time": 0, "end_time": 1,
                            "waypoints": [{"x": 0, "y": 0, "z": 0}, {"x": 1, "y": 0, "z": 0}]},
                "others": [{
                    "owner_id": "DELIVERY-101",
                    "departure_time": "2025-01-01T00:00:00Z",
                    "waypoints": [
                        {"x": 0, "y": 0, "z": 50, "time_offset_s": 0},
                        {"x": 0, "y": 10, "z": 50, "time_offset": 12.5}
                    ]
                }]
            }"#,
        )
        .unwrap();
        let other = &airspace.others[0];
        assert_eq!(other.owner_id, "DELIVERY-101");
        assert_eq!(other.waypoints[0].t, 1_735_689_600.0);
        assert_eq!(other.waypoints[1].t, 1_735_689_612.5);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_airspace(r#"{"primary": {"owner_id": "P"}}"#).is_err());
        assert!(parse_airspace("not json").is_err());
    }
}
