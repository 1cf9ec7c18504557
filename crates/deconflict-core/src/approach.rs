//! Closed-form closest approach between two linear legs.
//!
//! While both aircraft fly a single leg, their relative displacement is
//! `d(t) = d0 + w * (t - a)`, so the squared separation is a quadratic in
//! `t` with a non-negative leading coefficient. Minimum and threshold
//! crossings therefore have exact solutions; nothing here samples time.

use crate::models::Position;
use crate::overlap::TimeWindow;
use crate::trajectory::{Segment, Trajectory};

/// Relative tolerance when comparing squared separation to the threshold.
const SEPARATION_REL_EPS: f64 = 16.0 * f64::EPSILON;

/// Below this relative change over the window the separation is flat.
const FLAT_REL_EPS: f64 = 1e-20;

/// Sub-interval on which each aircraft stays on one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPair {
    pub window: TimeWindow,
    pub primary: Segment,
    pub other: Segment,
}

/// Minimum separation over a [`SegmentPair`] window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    pub t: f64,
    pub primary_position: Position,
    pub other_position: Position,
    pub distance: f64,
    /// Separation is constant over the whole window
    pub flat: bool,
}

/// Split an overlap window at every waypoint time of either mission.
///
/// Pieces come back in time order. A zero-length overlap yields a single
/// instant piece.
pub fn segment_sweep(
    primary: &Trajectory<'_>,
    other: &Trajectory<'_>,
    overlap: TimeWindow,
) -> Vec<SegmentPair> {
    let mut cuts: Vec<f64> = primary
        .breakpoints_within(&overlap)
        .chain(other.breakpoints_within(&overlap))
        .chain([overlap.start, overlap.end])
        .collect();
    cuts.sort_by(f64::total_cmp);
    cuts.dedup();

    let pair_at = |window: TimeWindow| SegmentPair {
        window,
        primary: primary.segment(primary.segment_index_at(window.start)),
        other: other.segment(other.segment_index_at(window.start)),
    };

    if cuts.len() == 1 {
        return vec![pair_at(TimeWindow::new(cuts[0], cuts[0]))];
    }

    cuts.windows(2)
        .map(|bounds| pair_at(TimeWindow::new(bounds[0], bounds[1])))
        .collect()
}

/// Quadratic `q(s) = qa*s^2 + 2*qb*s + qc` for the squared separation,
/// with `s = t - window.start`.
#[derive(Debug, Clone, Copy)]
struct RelativeMotion {
    window: TimeWindow,
    qa: f64,
    qb: f64,
    qc: f64,
}

impl RelativeMotion {
    fn new(pair: &SegmentPair) -> Self {
        let start = pair.window.start;
        let offset = pair.primary.position_at(start) - pair.other.position_at(start);
        let velocity = pair.primary.velocity() - pair.other.velocity();
        Self {
            window: pair.window,
            qa: velocity.norm_squared(),
            qb: offset.dot(velocity),
            qc: offset.norm_squared(),
        }
    }

    fn span(&self) -> f64 {
        self.window.duration()
    }

    /// Both the quadratic and the linear term are negligible over the window.
    fn is_flat(&self) -> bool {
        let span = self.span();
        let variation = (self.qa * span + 2.0 * self.qb.abs()) * span;
        variation <= FLAT_REL_EPS * self.qc
    }

    fn distance_squared_at(&self, s: f64) -> f64 {
        (self.qa * s + 2.0 * self.qb) * s + self.qc
    }

    /// Offset of the minimum, clamped into the window.
    ///
    /// A flat separation reports the start of the window.
    fn argmin(&self) -> f64 {
        if self.is_flat() {
            return 0.0;
        }
        (-self.qb / self.qa).clamp(0.0, self.span())
    }

    fn time_at(&self, s: f64) -> f64 {
        if s <= 0.0 {
            self.window.start
        } else if s >= self.span() {
            self.window.end
        } else {
            self.window.start + s
        }
    }

    /// Offsets where `q(s) <= limit`, as one closed range inside the window.
    fn within(&self, limit: f64) -> Option<(f64, f64)> {
        let span = self.span();
        if self.is_flat() {
            return (self.qc <= limit).then_some((0.0, span));
        }

        let s_min = self.argmin();
        if self.distance_squared_at(s_min) > limit {
            return None;
        }

        let excess = self.qc - limit;
        let root = (self.qb * self.qb - self.qa * excess).max(0.0).sqrt();

        let enter = if self.qc <= limit {
            0.0
        } else {
            let lower = if self.qb < 0.0 {
                excess / (-self.qb + root)
            } else {
                (-self.qb - root) / self.qa
            };
            lower.clamp(0.0, s_min)
        };

        let exit = if self.distance_squared_at(span) <= limit {
            span
        } else {
            let upper = if self.qb > 0.0 {
                excess / (-self.qb - root)
            } else {
                (-self.qb + root) / self.qa
            };
            upper.clamp(s_min, span)
        };

        Some((enter, exit))
    }
}

/// Minimum separation over the pair window.
pub fn closest_approach(pair: &SegmentPair) -> ClosestApproach {
    let motion = RelativeMotion::new(pair);
    let t = motion.time_at(motion.argmin());
    let primary_position = pair.primary.position_at(t);
    let other_position = pair.other.position_at(t);
    ClosestApproach {
        t,
        primary_position,
        other_position,
        distance: primary_position.distance_to(other_position),
        flat: motion.is_flat(),
    }
}

/// Squared threshold with the comparison tolerance applied.
pub(crate) fn separation_limit(threshold: f64) -> f64 {
    let squared = threshold * threshold;
    squared + squared * SEPARATION_REL_EPS
}

/// Part of the pair window where separation is at most `threshold`.
///
/// Boundaries strictly inside the window are exact threshold crossings.
pub fn breach_window(pair: &SegmentPair, threshold: f64) -> Option<TimeWindow> {
    let motion = RelativeMotion::new(pair);
    let (enter, exit) = motion.within(separation_limit(threshold))?;
    Some(TimeWindow::new(motion.time_at(enter), motion.time_at(exit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mission, Waypoint};

    fn pair(a: [(f64, f64, f64, f64); 2], b: [(f64, f64, f64, f64); 2]) -> SegmentPair {
        let seg = |p: [(f64, f64, f64, f64); 2]| Segment {
            start: Waypoint::new(p[0].0, p[0].1, p[0].2, p[0].3),
            end: Waypoint::new(p[1].0, p[1].1, p[1].2, p[1].3),
        };
        let primary = seg(a);
        let other = seg(b);
        let window = primary
            .window()
            .intersect(&other.window())
            .expect("legs overlap in time");
        SegmentPair {
            window,
            primary,
            other,
        }
    }

    #[test]
    fn test_head_on_minimum_inside_window() {
        let p = pair(
            [(0.0, 0.0, 0.0, 0.0), (100.0, 0.0, 0.0, 10.0)],
            [(100.0, 0.0, 0.0, 0.0), (0.0, 0.0, 0.0, 10.0)],
        );
        let cpa = closest_approach(&p);
        assert_eq!(cpa.t, 5.0);
        assert_eq!(cpa.distance, 0.0);
        assert_eq!(cpa.primary_position, Position::new(50.0, 0.0, 0.0));
        assert!(!cpa.flat);
    }

    #[test]
    fn test_minimum_clamped_to_closer_endpoint() {
        // Diverging from the start: closest at the window start.
        let p = pair(
            [(0.0, 0.0, 0.0, 0.0), (0.0, 100.0, 0.0, 10.0)],
            [(0.0, -10.0, 0.0, 0.0), (0.0, -110.0, 0.0, 10.0)],
        );
        let cpa = closest_approach(&p);
        assert_eq!(cpa.t, 0.0);
        assert_eq!(cpa.distance, 10.0);

        // Still converging at the end: closest at the window end.
        let p = pair(
            [(0.0, 0.0, 0.0, 0.0), (40.0, 0.0, 0.0, 10.0)],
            [(100.0, 0.0, 0.0, 0.0), (60.0, 0.0, 0.0, 10.0)],
        );
        let cpa = closest_approach(&p);
        assert_eq!(cpa.t, 10.0);
        assert_eq!(cpa.distance, 20.0);
    }

    #[test]
    fn test_identical_velocity_is_flat() {
        let p = pair(
            [(0.0, 0.0, 0.0, 0.0), (100.0, 0.0, 0.0, 10.0)],
            [(0.0, 30.0, 0.0, 0.0), (100.0, 30.0, 0.0, 10.0)],
        );
        let cpa = closest_approach(&p);
        assert!(cpa.flat);
        assert_eq!(cpa.t, 0.0);
        assert_eq!(cpa.distance, 30.0);

        assert_eq!(breach_window(&p, 30.0), Some(TimeWindow::new(0.0, 10.0)));
        assert_eq!(breach_window(&p, 29.0), None);
    }

    #[test]
    fn test_breach_window_crossings_are_exact() {
        // Relative speed 20 m/s closing from 100 m; within 20 m for s in [4, 6].
        let p = pair(
            [(0.0, 0.0, 0.0, 0.0), (100.0, 0.0, 0.0, 10.0)],
            [(100.0, 0.0, 0.0, 0.0), (0.0, 0.0, 0.0, 10.0)],
        );
        let window = breach_window(&p, 20.0).unwrap();
        assert!((window.start - 4.0).abs() < 1e-9);
        assert!((window.end - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_breach_window_touching_threshold_is_instant() {
        let p = pair(
            [(0.0, 0.0, 0.0, 0.0), (100.0, 0.0, 0.0, 10.0)],
            [(50.0, 20.0, 0.0, 0.0), (50.0, 20.0, 0.0, 10.0)],
        );
        let window = breach_window(&p, 20.0).unwrap();
        assert!((window.start - 5.0).abs() < 1e-4);
        assert!((window.end - 5.0).abs() < 1e-4);
        assert_eq!(breach_window(&p, 19.9), None);
    }

    #[test]
    fn test_slow_drift_across_threshold_is_not_flat() {
        // Tiny relative speed against a huge offset: the linear term dominates.
        let p = pair(
            [(0.0, 0.0, 0.0, 0.0), (0.0, 0.0, 0.0, 1000.0)],
            [(0.0, 1e9, 0.0, 0.0), (0.0, 1e9 - 1e-3, 0.0, 1000.0)],
        );
        let cpa = closest_approach(&p);
        assert!(!cpa.flat);
        assert_eq!(cpa.t, 1000.0);
        assert_eq!(cpa.distance, 1e9 - 1e-3);

        let threshold = 1e9 - 5e-4;
        let window = breach_window(&p, threshold).unwrap();
        assert!((window.start - 500.0).abs() < 2.0, "entered at {}", window.start);
        assert_eq!(window.end, 1000.0);
        assert!(cpa.distance <= threshold);
    }

    #[test]
    fn test_extreme_bounded_values_stay_finite() {
        let p = pair(
            [(-1e70, 0.0, 0.0, 0.0), (1e70, 0.0, 0.0, 2.0)],
            [(0.0, 0.5, 0.0, 0.0), (0.0, 0.5, 0.0, 2.0)],
        );
        let cpa = closest_approach(&p);
        assert_eq!(cpa.t, 1.0);
        assert_eq!(cpa.distance, 0.5);

        let window = breach_window(&p, 10.0).unwrap();
        assert!(window.start.is_finite() && window.end.is_finite());
        assert!(window.start <= 1.0 && window.end >= 1.0);
        assert!((window.start - 1.0).abs() < 1e-6 && (window.end - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sweep_splits_at_all_waypoint_times() {
        let a = Mission::from_tuples(
            "A",
            &[(0.0, 0.0, 0.0, 0.0), (10.0, 0.0, 0.0, 10.0), (20.0, 0.0, 0.0, 20.0)],
        );
        let b = Mission::from_tuples(
            "B",
            &[(0.0, 5.0, 0.0, 5.0), (0.0, 15.0, 0.0, 15.0), (0.0, 25.0, 0.0, 25.0)],
        );
        let ta = Trajectory::new(&a).unwrap();
        let tb = Trajectory::new(&b).unwrap();
        let pieces = segment_sweep(&ta, &tb, TimeWindow::new(5.0, 20.0));
        let bounds: Vec<(f64, f64)> = pieces
            .iter()
            .map(|p| (p.window.start, p.window.end))
            .collect();
        assert_eq!(bounds, vec![(5.0, 10.0), (10.0, 15.0), (15.0, 20.0)]);
        assert_eq!(pieces[1].primary.start.t, 10.0);
        assert_eq!(pieces[1].other.start.t, 5.0);
        assert_eq!(pieces[2].other.start.t, 15.0);
    }

    #[test]
    fn test_sweep_instant_overlap() {
        let a = Mission::from_tuples("A", &[(0.0, 0.0, 0.0, 0.0), (10.0, 0.0, 0.0, 10.0)]);
        let b = Mission::from_tuples("B", &[(10.0, 0.0, 0.0, 10.0), (20.0, 0.0, 0.0, 20.0)]);
        let ta = Trajectory::new(&a).unwrap();
        let tb = Trajectory::new(&b).unwrap();
        let pieces = segment_sweep(&ta, &tb, TimeWindow::new(10.0, 10.0));
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].window.is_instant());
        let cpa = closest_approach(&pieces[0]);
        assert_eq!(cpa.t, 10.0);
        assert_eq!(cpa.distance, 0.0);
    }
}
