//! Structural checks applied to a mission before any trajectory work.

use crate::error::{DeconflictError, InvalidMissionReason, Result};
use crate::models::{Mission, Position};
use crate::trajectory::Segment;

/// Largest accepted coordinate magnitude on any axis.
///
/// Relative offsets, velocities and their products in the closest-approach
/// quadratic stay finite for every pair of missions inside this bound.
pub const MAX_COORDINATE_MAGNITUDE: f64 = 1e70;

/// Largest accepted velocity component on any leg, in units per second.
pub const MAX_SPEED: f64 = 1e70;

fn within_bound(p: Position, bound: f64) -> bool {
    p.x.abs() <= bound && p.y.abs() <= bound && p.z.abs() <= bound
}

/// Check that a mission has at least two waypoints, finite bounded values,
/// strictly increasing timestamps and bounded leg speeds.
pub fn validate_mission(mission: &Mission) -> Result<()> {
    check_waypoints(mission)
        .map_err(|reason| DeconflictError::invalid_mission(&mission.owner_id, reason))
}

fn check_waypoints(mission: &Mission) -> std::result::Result<(), InvalidMissionReason> {
    let waypoints = &mission.waypoints;
    if waypoints.len() < 2 {
        return Err(InvalidMissionReason::TooFewWaypoints {
            count: waypoints.len(),
        });
    }

    for (index, wp) in waypoints.iter().enumerate() {
        if !wp.position().is_finite() || !wp.t.is_finite() {
            return Err(InvalidMissionReason::MalformedCoordinate { index });
        }
        if !within_bound(wp.position(), MAX_COORDINATE_MAGNITUDE) {
            return Err(InvalidMissionReason::CoordinateOutOfRange {
                index,
                limit: MAX_COORDINATE_MAGNITUDE,
            });
        }
    }

    for (index, pair) in waypoints.windows(2).enumerate() {
        if pair[1].t <= pair[0].t {
            return Err(InvalidMissionReason::NonMonotonicTime {
                index: index + 1,
                previous: pair[0].t,
                current: pair[1].t,
            });
        }
    }

    for (index, pair) in waypoints.windows(2).enumerate() {
        let leg = Segment {
            start: pair[0],
            end: pair[1],
        };
        if !within_bound(leg.velocity(), MAX_SPEED) {
            return Err(InvalidMissionReason::SpeedOutOfRange {
                index,
                limit: MAX_SPEED,
            });
        }
    }

    Ok(())
}
