//! Random planned traffic for load testing.

use deconflict_core::{Mission, Position};
use rand::Rng;

/// Bounds for generated missions.
#[derive(Debug, Clone)]
pub struct TrafficConfig {
    /// Half-width of the horizontal square, centered on the origin (meters)
    pub extent_m: f64,
    pub min_altitude_m: f64,
    pub max_altitude_m: f64,
    pub min_waypoints: usize,
    pub max_waypoints: usize,
    /// Latest allowed departure (seconds)
    pub horizon_s: f64,
    pub min_duration_s: f64,
    pub max_duration_s: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            extent_m: 2_000.0,
            min_altitude_m: 30.0,
            max_altitude_m: 120.0,
            min_waypoints: 2,
            max_waypoints: 8,
            horizon_s: 600.0,
            min_duration_s: 60.0,
            max_duration_s: 600.0,
        }
    }
}

/// A constant-speed mission through random waypoints inside the configured volume.
pub fn random_mission<R: Rng + ?Sized>(
    rng: &mut R,
    owner_id: impl Into<String>,
    config: &TrafficConfig,
) -> Mission {
    let count = rng.random_range(config.min_waypoints..=config.max_waypoints.max(config.min_waypoints));
    let positions: Vec<Position> = (0..count.max(2))
        .map(|_| {
            Position::new(
                rng.random_range(-config.extent_m..=config.extent_m),
                rng.random_range(-config.extent_m..=config.extent_m),
                rng.random_range(config.min_altitude_m..=config.max_altitude_m),
            )
        })
        .collect();

    let start = rng.random_range(0.0..=config.horizon_s);
    let duration = rng.random_range(config.min_duration_s..=config.max_duration_s);
    Mission::from_time_window(owner_id, &positions, start, start + duration)
}

/// `count` random missions named `TRAFFIC-0001` onward.
pub fn random_traffic<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    config: &TrafficConfig,
) -> Vec<Mission> {
    (0..count)
        .map(|i| random_mission(rng, format!("TRAFFIC-{:04}", i + 1), config))
        .collect()
}
