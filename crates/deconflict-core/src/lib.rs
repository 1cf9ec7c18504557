//! Strategic deconfliction engine for drone missions.
//!
//! Decides whether a planned mission keeps a minimum separation from every
//! other planned mission, in space and time, and explains each conflict.

pub mod aggregate;
pub mod approach;
pub mod error;
pub mod models;
pub mod overlap;
pub mod rules;
pub mod service;
pub mod trajectory;
pub mod validation;

pub use aggregate::{aggregate_conflicts, ConflictAggregator};
pub use approach::{breach_window, closest_approach, segment_sweep, ClosestApproach, SegmentPair};
pub use error::{DeconflictError, InvalidMissionReason, OutOfDomain, Result};
pub use models::{ConflictEpisode, DeconflictionReport, Mission, Position, Verdict, Waypoint};
pub use overlap::{resolve_overlap, TimeWindow};
pub use rules::{EngineRules, SafetyBuffer, DEFAULT_SAFETY_BUFFER_M};
pub use service::{evaluate, Deconflictor};
pub use trajectory::{Segment, Trajectory};
pub use validation::{validate_mission, MAX_COORDINATE_MAGNITUDE, MAX_SPEED};
