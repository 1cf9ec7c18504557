//! Temporal overlap between mission time domains.

use serde::{Deserialize, Serialize};

use crate::models::Mission;

/// Closed time interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// A window whose start and end coincide.
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Intersection of two windows, `None` when they are disjoint.
    ///
    /// Windows that only touch produce an instant.
    pub fn intersect(&self, other: &TimeWindow) -> Option<TimeWindow> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start > end {
            return None;
        }
        Some(TimeWindow::new(start, end))
    }
}

/// Shared active interval of two missions.
pub fn resolve_overlap(a: &Mission, b: &Mission) -> Option<TimeWindow> {
    let domain_a = a.time_domain()?;
    let domain_b = b.time_domain()?;
    domain_a.intersect(&domain_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_windows() {
        let a = TimeWindow::new(0.0, 10.0);
        let b = TimeWindow::new(20.0, 30.0);
        assert_eq!(a.intersect(&b), None);
        assert_eq!(b.intersect(&a), None);
    }

    #[test]
    fn test_partial_overlap() {
        let a = TimeWindow::new(0.0, 15.0);
        let b = TimeWindow::new(10.0, 30.0);
        assert_eq!(a.intersect(&b), Some(TimeWindow::new(10.0, 15.0)));
    }

    #[test]
    fn test_touching_windows_give_instant() {
        let a = TimeWindow::new(0.0, 10.0);
        let b = TimeWindow::new(10.0, 20.0);
        let overlap = a.intersect(&b).unwrap();
        assert!(overlap.is_instant());
        assert_eq!(overlap.start, 10.0);
    }

    #[test]
    fn test_resolve_overlap_from_missions() {
        let a = Mission::from_tuples("A", &[(0.0, 0.0, 0.0, 0.0), (1.0, 0.0, 0.0, 10.0)]);
        let b = Mission::from_tuples("B", &[(0.0, 0.0, 0.0, 20.0), (1.0, 0.0, 0.0, 30.0)]);
        let c = Mission::from_tuples("C", &[(0.0, 0.0, 0.0, 5.0), (1.0, 0.0, 0.0, 25.0)]);
        assert_eq!(resolve_overlap(&a, &b), None);
        assert_eq!(resolve_overlap(&a, &c), Some(TimeWindow::new(5.0, 10.0)));
        assert_eq!(resolve_overlap(&c, &b), Some(TimeWindow::new(20.0, 25.0)));
    }
}
