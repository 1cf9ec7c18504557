//! Error types for the deconfliction engine.

use thiserror::Error;

/// Why a mission was rejected before any trajectory work.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidMissionReason {
    /// Fewer than two waypoints
    #[error("too few waypoints ({count}, need at least 2)")]
    TooFewWaypoints { count: usize },

    /// Timestamp not strictly greater than its predecessor
    #[error("non-monotonic time at waypoint {index}: {current} does not follow {previous}")]
    NonMonotonicTime {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// NaN or infinite coordinate or timestamp
    #[error("malformed coordinate at waypoint {index}")]
    MalformedCoordinate { index: usize },

    /// Coordinate too large for squared separations to stay representable
    #[error("coordinate at waypoint {index} exceeds {limit:e} in magnitude")]
    CoordinateOutOfRange { index: usize, limit: f64 },

    /// Leg velocity too large for squared separations to stay representable
    #[error("leg from waypoint {index} exceeds {limit:e} per second")]
    SpeedOutOfRange { index: usize, limit: f64 },
}

/// Errors surfaced by the engine to its callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeconflictError {
    /// Mission failed structural validation
    #[error("invalid mission '{owner_id}': {reason}")]
    InvalidMission {
        owner_id: String,
        reason: InvalidMissionReason,
    },

    /// Safety buffer is negative or not finite
    #[error("invalid safety buffer: {value}")]
    InvalidBuffer { value: f64 },
}

impl DeconflictError {
    pub(crate) fn invalid_mission(owner_id: &str, reason: InvalidMissionReason) -> Self {
        Self::InvalidMission {
            owner_id: owner_id.to_string(),
            reason,
        }
    }
}

/// A trajectory was queried outside its mission's time domain.
///
/// The aircraft is not present at that time. Callers treat this as
/// "no conflict possible", never as a failure of the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("time {t} outside mission domain [{start}, {end}]")]
pub struct OutOfDomain {
    pub t: f64,
    pub start: f64,
    pub end: f64,
}

pub type Result<T> = std::result::Result<T, DeconflictError>;
