//! Piecewise-linear position-over-time derived from a mission.

use crate::error::{OutOfDomain, Result};
use crate::models::{Mission, Position, Waypoint};
use crate::overlap::TimeWindow;
use crate::validation::validate_mission;

/// One linear leg between consecutive waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Waypoint,
    pub end: Waypoint,
}

impl Segment {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start.t, self.end.t)
    }

    /// Constant velocity along the leg.
    pub fn velocity(&self) -> Position {
        let dt = self.end.t - self.start.t;
        (self.end.position() - self.start.position()) * (1.0 / dt)
    }

    /// Affine interpolation between the endpoints.
    ///
    /// Endpoint times return the waypoint positions exactly.
    pub fn position_at(&self, t: f64) -> Position {
        if t == self.start.t {
            return self.start.position();
        }
        if t == self.end.t {
            return self.end.position();
        }
        let p0 = self.start.position();
        let p1 = self.end.position();
        let ratio = (t - self.start.t) / (self.end.t - self.start.t);
        p0 + (p1 - p0) * ratio
    }
}

/// Continuous position function of a validated mission.
///
/// Borrows its mission; it is never stored apart from it.
#[derive(Debug, Clone, Copy)]
pub struct Trajectory<'a> {
    mission: &'a Mission,
}

impl<'a> Trajectory<'a> {
    /// Validate `mission` and derive its trajectory.
    pub fn new(mission: &'a Mission) -> Result<Self> {
        validate_mission(mission)?;
        Ok(Self { mission })
    }

    pub fn mission(&self) -> &'a Mission {
        self.mission
    }

    pub fn owner_id(&self) -> &'a str {
        &self.mission.owner_id
    }

    pub fn domain(&self) -> TimeWindow {
        let waypoints = &self.mission.waypoints;
        TimeWindow::new(waypoints[0].t, waypoints[waypoints.len() - 1].t)
    }

    pub fn segment_count(&self) -> usize {
        self.mission.waypoints.len() - 1
    }

    /// Leg `index`, starting at waypoint `index`.
    pub fn segment(&self, index: usize) -> Segment {
        Segment {
            start: self.mission.waypoints[index],
            end: self.mission.waypoints[index + 1],
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + 'a {
        self.mission.waypoints.windows(2).map(|pair| Segment {
            start: pair[0],
            end: pair[1],
        })
    }

    /// Index of the leg in effect at `t`.
    ///
    /// At a shared waypoint time the later leg wins; the final waypoint
    /// time maps to the last leg.
    pub fn segment_index_at(&self, t: f64) -> usize {
        let after = self.mission.waypoints.partition_point(|wp| wp.t <= t);
        after.saturating_sub(1).min(self.segment_count() - 1)
    }

    /// Position at `t`, or [`OutOfDomain`] when the aircraft is not flying.
    pub fn position_at(&self, t: f64) -> std::result::Result<Position, OutOfDomain> {
        let domain = self.domain();
        if !domain.contains(t) {
            return Err(OutOfDomain {
                t,
                start: domain.start,
                end: domain.end,
            });
        }
        Ok(self.segment(self.segment_index_at(t)).position_at(t))
    }

    /// Waypoint timestamps that fall inside `window`, ascending.
    pub(crate) fn breakpoints_within(&self, window: &TimeWindow) -> impl Iterator<Item = f64> + 'a {
        let window = *window;
        self.mission
            .waypoints
            .iter()
            .map(|wp| wp.t)
            .filter(move |t| window.contains(*t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mission() -> Mission {
        Mission::from_tuples(
            "PRIMARY-001",
            &[
                (0.0, 0.0, 100.0, 0.0),
                (250.0, 0.0, 100.0, 50.0),
                (250.0, 100.0, 150.0, 70.0),
            ],
        )
    }

    #[test]
    fn test_position_at_waypoints_is_exact() {
        let mission = sample_mission();
        let trajectory = Trajectory::new(&mission).unwrap();
        for wp in &mission.waypoints {
            assert_eq!(trajectory.position_at(wp.t).unwrap(), wp.position());
        }
    }

    #[test]
    fn test_position_at_midpoint() {
        let mission = sample_mission();
        let trajectory = Trajectory::new(&mission).unwrap();
        let pos = trajectory.position_at(25.0).unwrap();
        assert_eq!(pos, Position::new(125.0, 0.0, 100.0));
        let pos = trajectory.position_at(60.0).unwrap();
        assert_eq!(pos, Position::new(250.0, 50.0, 125.0));
    }

    #[test]
    fn test_out_of_domain() {
        let mission = sample_mission();
        let trajectory = Trajectory::new(&mission).unwrap();
        let err = trajectory.position_at(-0.5).unwrap_err();
        assert_eq!(err.start, 0.0);
        assert_eq!(err.end, 70.0);
        assert!(trajectory.position_at(70.5).is_err());
    }

    #[test]
    fn test_boundary_uses_later_segment() {
        let mission = sample_mission();
        let trajectory = Trajectory::new(&mission).unwrap();
        assert_eq!(trajectory.segment_index_at(0.0), 0);
        assert_eq!(trajectory.segment_index_at(50.0), 1);
        assert_eq!(trajectory.segment_index_at(70.0), 1);
    }

    #[test]
    fn test_invalid_mission_has_no_trajectory() {
        let mission = Mission::from_tuples("SOLO", &[(0.0, 0.0, 0.0, 0.0)]);
        assert!(Trajectory::new(&mission).is_err());
    }

    #[test]
    fn test_segment_velocity() {
        let mission = sample_mission();
        let trajectory = Trajectory::new(&mission).unwrap();
        let segments: Vec<Segment> = trajectory.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].velocity(), Position::new(5.0, 0.0, 0.0));
        assert_eq!(segments[1].velocity(), Position::new(0.0, 5.0, 2.5));
    }
}
