//! Core data models for the deconfliction engine.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::overlap::TimeWindow;

/// A point in 3D space. All axes share one unit (meters in the demos).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Position) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn norm(self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Euclidean distance to another position.
    pub fn distance_to(self, other: Position) -> f64 {
        (self - other).norm()
    }

    pub fn midpoint(self, other: Position) -> Position {
        Position::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Position {
    type Output = Position;

    fn mul(self, rhs: f64) -> Position {
        Position::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A timestamped vertex of a mission path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Absolute time (seconds)
    pub t: f64,
}

impl Waypoint {
    pub const fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self { x, y, z, t }
    }

    pub fn at(position: Position, t: f64) -> Self {
        Self::new(position.x, position.y, position.z, t)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }
}

/// An ordered, time-stamped path for one aircraft.
///
/// Missions are plain data. Structural checks happen in
/// [`crate::validation`] when a mission enters the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub owner_id: String,
    pub waypoints: Vec<Waypoint>,
}

impl Mission {
    pub fn new(owner_id: impl Into<String>, waypoints: Vec<Waypoint>) -> Self {
        Self {
            owner_id: owner_id.into(),
            waypoints,
        }
    }

    /// Build a mission from raw `(x, y, z, t)` tuples.
    pub fn from_tuples(owner_id: impl Into<String>, points: &[(f64, f64, f64, f64)]) -> Self {
        let waypoints = points
            .iter()
            .map(|&(x, y, z, t)| Waypoint::new(x, y, z, t))
            .collect();
        Self::new(owner_id, waypoints)
    }

    /// Build a mission that flies an untimed route at constant speed
    /// between `start_time` and `end_time`.
    ///
    /// Timestamps are proportional to cumulative path length. A route of
    /// zero total length gets evenly spaced timestamps instead.
    ///
    /// Two consecutive identical positions inside a route that does move
    /// share one timestamp, so validation rejects the result with
    /// `NonMonotonicTime`. Express a pause with explicit times instead,
    /// e.g. [`Mission::new`] or [`Mission::hover`].
    pub fn from_time_window(
        owner_id: impl Into<String>,
        positions: &[Position],
        start_time: f64,
        end_time: f64,
    ) -> Self {
        let duration = end_time - start_time;
        let mut cumulative = Vec::with_capacity(positions.len());
        let mut travelled = 0.0;
        for (i, pos) in positions.iter().enumerate() {
            if i > 0 {
                travelled += positions[i - 1].distance_to(*pos);
            }
            cumulative.push(travelled);
        }

        let last = positions.len().saturating_sub(1);
        let waypoints = positions
            .iter()
            .zip(cumulative.iter())
            .enumerate()
            .map(|(i, (pos, &dist))| {
                let t = if i == last && i > 0 {
                    end_time
                } else if travelled > 0.0 {
                    start_time + duration * (dist / travelled)
                } else if last > 0 {
                    start_time + duration * (i as f64 / last as f64)
                } else {
                    start_time
                };
                Waypoint::at(*pos, t)
            })
            .collect();

        Self::new(owner_id, waypoints)
    }

    /// A stationary mission holding `position` from `start_time` to `end_time`.
    pub fn hover(
        owner_id: impl Into<String>,
        position: Position,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self::new(
            owner_id,
            vec![
                Waypoint::at(position, start_time),
                Waypoint::at(position, end_time),
            ],
        )
    }

    /// `[t_start, t_end]`, or `None` for a mission without waypoints.
    pub fn time_domain(&self) -> Option<TimeWindow> {
        let first = self.waypoints.first()?;
        let last = self.waypoints.last()?;
        Some(TimeWindow::new(first.t, last.t))
    }

    pub fn duration(&self) -> f64 {
        self.time_domain().map(|w| w.duration()).unwrap_or(0.0)
    }

    /// Total path length along the waypoints.
    pub fn total_distance(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].position().distance_to(pair[1].position()))
            .sum()
    }

    pub fn average_speed(&self) -> f64 {
        let duration = self.duration();
        if duration > 0.0 {
            self.total_distance() / duration
        } else {
            0.0
        }
    }
}

/// Overall outcome of a deconfliction check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No separation violation against any checked mission
    Clear,
    /// At least one conflict episode
    Conflict,
}

/// A maximal interval during which the primary mission is within the
/// safety buffer of one other mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictEpisode {
    /// Owner of the conflicting mission
    pub other_owner_id: String,
    pub t_enter: f64,
    pub t_exit: f64,
    /// Time of closest approach inside the interval
    pub t_min: f64,
    /// Primary aircraft position at `t_min`
    pub primary_position: Position,
    /// Other aircraft position at `t_min`
    pub other_position: Position,
    pub min_distance: f64,
}

impl ConflictEpisode {
    pub fn duration(&self) -> f64 {
        self.t_exit - self.t_enter
    }

    pub fn is_instantaneous(&self) -> bool {
        self.t_exit <= self.t_enter
    }

    /// Midpoint between the two aircraft at closest approach.
    pub fn midpoint(&self) -> Position {
        self.primary_position.midpoint(self.other_position)
    }
}

/// Verdict plus every conflict episode, ordered by `t_enter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeconflictionReport {
    pub primary_owner_id: String,
    pub verdict: Verdict,
    pub episodes: Vec<ConflictEpisode>,
    /// Other missions excluded from the check because they were invalid
    #[serde(default)]
    pub skipped: Vec<String>,
}

impl DeconflictionReport {
    pub fn is_clear(&self) -> bool {
        self.verdict == Verdict::Clear
    }

    /// Owners of conflicting missions, sorted and deduplicated.
    pub fn conflicting_owners(&self) -> Vec<&str> {
        let mut owners: Vec<&str> = self
            .episodes
            .iter()
            .map(|e| e.other_owner_id.as_str())
            .collect();
        owners.sort_unstable();
        owners.dedup();
        owners
    }

    pub fn episodes_with<'a>(
        &'a self,
        owner_id: &'a str,
    ) -> impl Iterator<Item = &'a ConflictEpisode> + 'a {
        self.episodes
            .iter()
            .filter(move |e| e.other_owner_id == owner_id)
    }

    /// Sum of episode durations.
    pub fn total_conflict_time(&self) -> f64 {
        self.episodes.iter().map(ConflictEpisode::duration).sum()
    }
}
