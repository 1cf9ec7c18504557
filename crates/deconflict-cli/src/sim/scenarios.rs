//! Pre-defined airspace scenarios for demos and regression checks.

use deconflict_core::{Mission, Position, SafetyBuffer};

/// A primary mission plus the planned traffic it is checked against.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub buffer: SafetyBuffer,
    pub primary: Mission,
    pub others: Vec<Mission>,
}

fn route(points: &[(f64, f64, f64)]) -> Vec<Position> {
    points
        .iter()
        .map(|&(x, y, z)| Position::new(x, y, z))
        .collect()
}

fn timed(owner_id: &str, points: &[(f64, f64, f64)], start: f64, end: f64) -> Mission {
    Mission::from_time_window(owner_id, &route(points), start, end)
}

/// Diagonal climb with parallel, stacked and time-separated traffic.
pub fn create_conflict_free_scenario() -> Scenario {
    Scenario {
        id: 1,
        name: "Conflict-Free Operations".to_string(),
        description: "Traffic separated by lateral offset, altitude and time".to_string(),
        buffer: SafetyBuffer::default(),
        primary: timed(
            "PRIMARY-001",
            &[(0.0, 0.0, 100.0), (200.0, 200.0, 150.0), (400.0, 400.0, 100.0)],
            0.0,
            60.0,
        ),
        others: vec![
            timed("DELIVERY-101", &[(0.0, 150.0, 200.0), (400.0, 150.0, 200.0)], 0.0, 60.0),
            timed("SURVEY-201", &[(100.0, 100.0, 250.0), (300.0, 300.0, 250.0)], 10.0, 50.0),
            // Same ground track, flown after the primary has landed
            timed("PATROL-301", &[(0.0, 0.0, 100.0), (400.0, 400.0, 100.0)], 80.0, 140.0),
        ],
    }
}

/// West-east primary crossed by a south-north flight at the same altitude.
pub fn create_crossing_scenario() -> Scenario {
    Scenario {
        id: 2,
        name: "Path Crossing Conflict".to_string(),
        description: "Two flights reach the same intersection at the same time".to_string(),
        buffer: SafetyBuffer::default(),
        primary: timed("PRIMARY-002", &[(0.0, 200.0, 120.0), (400.0, 200.0, 120.0)], 0.0, 40.0),
        others: vec![
            timed("DELIVERY-102", &[(200.0, 0.0, 120.0), (200.0, 400.0, 120.0)], 0.0, 40.0),
            timed("SURVEY-202", &[(0.0, 100.0, 180.0), (400.0, 100.0, 180.0)], 0.0, 40.0),
        ],
    }
}

/// Zig-zag primary against a loop flight and a hovering inspection drone.
pub fn create_multiple_conflicts_scenario() -> Scenario {
    Scenario {
        id: 3,
        name: "Multiple Conflict Points".to_string(),
        description: "Conflicts with a looping flight and a hover at the route apex".to_string(),
        buffer: SafetyBuffer::default(),
        primary: timed(
            "PRIMARY-003",
            &[
                (0.0, 200.0, 100.0),
                (100.0, 200.0, 100.0),
                (200.0, 300.0, 100.0),
                (300.0, 200.0, 100.0),
                (400.0, 200.0, 100.0),
            ],
            0.0,
            80.0,
        ),
        others: vec![
            timed(
                "EMERGENCY-401",
                &[
                    (50.0, 150.0, 100.0),
                    (50.0, 250.0, 100.0),
                    (350.0, 250.0, 100.0),
                    (350.0, 150.0, 100.0),
                ],
                0.0,
                80.0,
            ),
            Mission::hover("INSPECTION-501", Position::new(200.0, 300.0, 110.0), 30.0, 50.0),
        ],
    }
}

/// Short crossing that passes well inside the buffer.
pub fn create_near_miss_scenario() -> Scenario {
    Scenario {
        id: 4,
        name: "Near Miss Detection".to_string(),
        description: "A transport flight cuts across shortly after the primary passes".to_string(),
        buffer: SafetyBuffer::default(),
        primary: timed("PRIMARY-004", &[(0.0, 0.0, 100.0), (300.0, 0.0, 100.0)], 0.0, 30.0),
        others: vec![timed(
            "TRANSPORT-601",
            &[(150.0, -40.0, 100.0), (150.0, 40.0, 100.0)],
            10.0,
            25.0,
        )],
    }
}

/// Ascending spiral through layered traffic.
pub fn create_complex_3d_scenario() -> Scenario {
    Scenario {
        id: 5,
        name: "Complex 3D Airspace".to_string(),
        description: "Climbing spiral through three altitude layers".to_string(),
        buffer: SafetyBuffer::default(),
        primary: timed(
            "PRIMARY-005",
            &[
                (200.0, 200.0, 50.0),
                (250.0, 200.0, 100.0),
                (250.0, 250.0, 150.0),
                (200.0, 250.0, 200.0),
                (150.0, 250.0, 250.0),
                (150.0, 200.0, 300.0),
            ],
            0.0,
            90.0,
        ),
        others: vec![
            timed("LAYER-1", &[(150.0, 150.0, 100.0), (250.0, 250.0, 100.0)], 0.0, 50.0),
            timed("LAYER-2", &[(250.0, 150.0, 200.0), (150.0, 250.0, 200.0)], 20.0, 70.0),
            timed("LAYER-3", &[(200.0, 200.0, 150.0), (200.0, 200.0, 250.0)], 30.0, 60.0),
        ],
    }
}

/// Four drones from the cardinal directions meeting at the origin.
pub fn create_converging_scenario() -> Scenario {
    let offset_m = 300.0;
    let altitude_m = 50.0;
    let speed_mps = 8.0;
    let end_time = offset_m / speed_mps;
    let bearings: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

    let mut missions: Vec<Mission> = bearings
        .iter()
        .enumerate()
        .map(|(i, &bearing)| {
            let rad = bearing.to_radians();
            let start = Position::new(offset_m * rad.sin(), offset_m * rad.cos(), altitude_m);
            let center = Position::new(0.0, 0.0, altitude_m);
            Mission::from_time_window(format!("DRONE{:03}", i + 1), &[start, center], 0.0, end_time)
        })
        .collect();
    let primary = missions.remove(0);

    Scenario {
        id: 6,
        name: "Converging Traffic".to_string(),
        description: "Four drones converge on one point at the same moment".to_string(),
        buffer: SafetyBuffer::default(),
        primary,
        others: missions,
    }
}

pub fn catalogue() -> Vec<Scenario> {
    vec![
        create_conflict_free_scenario(),
        create_crossing_scenario(),
        create_multiple_conflicts_scenario(),
        create_near_miss_scenario(),
        create_complex_3d_scenario(),
        create_converging_scenario(),
    ]
}

pub fn find_scenario(id: u32) -> Option<Scenario> {
    catalogue().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deconflict_core::{evaluate, validate_mission};

    fn run(scenario: &Scenario) -> deconflict_core::DeconflictionReport {
        evaluate(&scenario.primary, &scenario.others, scenario.buffer).unwrap()
    }

    #[test]
    fn test_catalogue_missions_are_valid() {
        for scenario in catalogue() {
            validate_mission(&scenario.primary).unwrap();
            for other in &scenario.others {
                validate_mission(other).unwrap();
            }
        }
    }

    #[test]
    fn test_conflict_free_scenario_is_approved() {
        let report = run(&create_conflict_free_scenario());
        assert!(report.is_clear(), "unexpected episodes: {:?}", report.episodes);
    }

    #[test]
    fn test_crossing_scenario_conflicts_with_crossing_flight_only() {
        let report = run(&create_crossing_scenario());
        assert_eq!(report.conflicting_owners(), vec!["DELIVERY-102"]);
        assert_eq!(report.episodes.len(), 1);
        let episode = &report.episodes[0];
        assert!((episode.t_min - 20.0).abs() < 1e-9);
        assert!(episode.min_distance < 1e-9);
    }

    #[test]
    fn test_multiple_conflicts_scenario() {
        let report = run(&create_multiple_conflicts_scenario());
        assert_eq!(
            report.conflicting_owners(),
            vec!["EMERGENCY-401", "INSPECTION-501"]
        );
        let hover = report.episodes_with("INSPECTION-501").next().unwrap();
        assert!(hover.min_distance <= 10.0 + 1e-9);
        assert!(hover.t_enter >= 30.0 && hover.t_exit <= 50.0);
    }

    #[test]
    fn test_near_miss_scenario_is_denied() {
        let report = run(&create_near_miss_scenario());
        assert_eq!(report.conflicting_owners(), vec!["TRANSPORT-601"]);
    }

    #[test]
    fn test_complex_3d_scenario_conflicts_with_crossing_layer_only() {
        let report = run(&create_complex_3d_scenario());
        assert_eq!(report.conflicting_owners(), vec!["LAYER-2"]);
        assert_eq!(report.episodes.len(), 1);
        let episode = &report.episodes[0];
        assert!(episode.min_distance < 30.0);
        assert!(episode.t_min > 59.0 && episode.t_min < 62.0);
    }

    #[test]
    fn test_converging_scenario_creates_four_drones() {
        let scenario = create_converging_scenario();
        assert_eq!(scenario.others.len(), 3);
        assert_eq!(scenario.primary.owner_id, "DRONE001");
        let report = run(&scenario);
        assert_eq!(report.conflicting_owners().len(), 3);
    }

    #[test]
    fn test_find_scenario_by_id() {
        assert_eq!(find_scenario(2).unwrap().name, "Path Crossing Conflict");
        assert!(find_scenario(99).is_none());
    }
}
