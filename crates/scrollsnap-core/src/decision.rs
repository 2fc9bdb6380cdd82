//! Snap-point decision for a single axis
//!
//! Given where the container sits, which way the gesture was travelling and
//! the configured policy, pick the offset the axis should settle on. The
//! engine is pure arithmetic: no I/O, no clock, and it never fails. Callers
//! must only hand it a positive, finite snap length.

use crate::bounds::{clamp, nearest_cell};
use crate::geometry::Heading;

/// Offsets closer than this to the last confirmed snap point count as
/// sitting on it
pub const DRIFT_TOLERANCE: f64 = 1.0;

/// How far a gesture has to travel before the engine commits to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    /// Fraction of a cell, in [0, 1], that must be crossed to advance
    pub threshold: f64,
    /// Never skip an intermediate cell
    pub snap_stop: bool,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            snap_stop: false,
        }
    }
}

/// Everything the engine needs to decide one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapQuery {
    pub heading: Heading,
    /// Distance between snap points in pixels, must be > 0
    pub snap_length: f64,
    pub current_offset: f64,
    /// Offset of the most recently confirmed snap cell
    pub last_valid_point: f64,
    /// Largest reachable offset on this axis
    pub extent: f64,
    pub policy: ThresholdPolicy,
    /// Arrow/keyboard/resize request rather than a user gesture
    pub programmatic: bool,
}

/// Whether a gesture ending at `point` (in cells) has crossed the threshold
/// in its direction of travel
///
/// Ties do not count: a fraction exactly equal to the threshold snaps back.
pub fn crosses_threshold(heading: Heading, point: f64, threshold: f64) -> bool {
    let fraction = point.rem_euclid(1.0);
    match heading {
        Heading::Forward => fraction > threshold,
        Heading::Backward => 1.0 - fraction > threshold,
        Heading::Still => false,
    }
}

/// Cell a programmatic step starts from: the grid point the container sits
/// on, or when it rests between two points, the one behind the direction of
/// travel, so a step always lands on the next point ahead
fn step_origin(heading: Heading, point: f64, length: f64) -> f64 {
    let nearest = point.round();
    if ((point - nearest) * length).abs() < DRIFT_TOLERANCE {
        return nearest;
    }
    match heading {
        Heading::Forward => point.floor(),
        Heading::Backward => point.ceil(),
        Heading::Still => nearest,
    }
}

/// Decide the destination offset for one axis
pub fn decide(query: &SnapQuery) -> f64 {
    let length = query.snap_length;
    let step = query.heading.signum();

    let current = if (query.current_offset - query.last_valid_point).abs() < DRIFT_TOLERANCE {
        query.last_valid_point
    } else {
        query.current_offset
    };
    let point = current / length;

    let cell = if query.programmatic {
        step_origin(query.heading, point, length) + step
    } else if query.heading.is_still() {
        point.round()
    } else if crosses_threshold(query.heading, point, query.policy.threshold) {
        if query.policy.snap_stop {
            nearest_cell(query.last_valid_point, length) + step
        } else {
            match query.heading {
                Heading::Forward => point.ceil(),
                _ => point.floor(),
            }
        }
    } else {
        // Not far enough: fall back against the direction of travel
        match query.heading {
            Heading::Forward => point.floor(),
            _ => point.ceil(),
        }
    };

    clamp(0.0, query.extent.max(0.0), cell * length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(heading: Heading, offset: f64) -> SnapQuery {
        SnapQuery {
            heading,
            snap_length: 1000.0,
            current_offset: offset,
            last_valid_point: 0.0,
            extent: 4000.0,
            policy: ThresholdPolicy::default(),
            programmatic: false,
        }
    }

    #[test]
    fn test_advances_past_threshold() {
        assert_eq!(decide(&gesture(Heading::Forward, 850.0)), 1000.0);
    }

    #[test]
    fn test_snaps_back_below_threshold() {
        assert_eq!(decide(&gesture(Heading::Forward, 150.0)), 0.0);
    }

    #[test]
    fn test_threshold_tie_snaps_back() {
        assert_eq!(decide(&gesture(Heading::Forward, 200.0)), 0.0);
        assert_eq!(decide(&gesture(Heading::Forward, 200.0001)), 1000.0);
    }

    #[test]
    fn test_backward_threshold_measured_from_far_edge() {
        let mut query = gesture(Heading::Backward, 2850.0);
        query.last_valid_point = 3000.0;
        // 15% of a cell travelled backwards: not enough
        assert_eq!(decide(&query), 3000.0);

        query.current_offset = 2700.0;
        assert_eq!(decide(&query), 2000.0);
    }

    #[test]
    fn test_free_scroll_can_skip_cells() {
        let query = gesture(Heading::Forward, 2500.0);
        assert_eq!(decide(&query), 3000.0);
    }

    #[test]
    fn test_snap_stop_moves_one_cell_from_last_valid() {
        let mut query = gesture(Heading::Forward, 2500.0);
        query.policy.snap_stop = true;
        assert_eq!(decide(&query), 1000.0);

        query.heading = Heading::Backward;
        query.last_valid_point = 3000.0;
        query.current_offset = 600.0;
        assert_eq!(decide(&query), 2000.0);
    }

    #[test]
    fn test_snap_stop_never_skips() {
        for last_cell in 1..4 {
            for offset in (0..40).map(|i| i as f64 * 100.0 + 37.0) {
                for heading in [Heading::Forward, Heading::Backward] {
                    let mut query = gesture(heading, offset);
                    query.policy.snap_stop = true;
                    query.last_valid_point = last_cell as f64 * 1000.0;

                    let cell = (decide(&query) / 1000.0).round() as i64;
                    assert!(
                        (cell - last_cell).abs() <= 1 || !crosses_threshold(heading, offset / 1000.0, 0.2),
                        "skipped from cell {} to {} at offset {}",
                        last_cell,
                        cell,
                        offset
                    );
                }
            }
        }
    }

    #[test]
    fn test_programmatic_ignores_threshold() {
        let mut query = gesture(Heading::Forward, 500.0);
        query.programmatic = true;
        query.policy.threshold = 0.99;
        assert_eq!(decide(&query), 1000.0);

        query.current_offset = 1000.0;
        query.heading = Heading::Backward;
        assert_eq!(decide(&query), 0.0);

        query.current_offset = 1500.0;
        assert_eq!(decide(&query), 1000.0);

        query.current_offset = 1999.5;
        query.heading = Heading::Forward;
        assert_eq!(decide(&query), 3000.0);
    }

    #[test]
    fn test_drift_is_absorbed_by_last_valid_point() {
        let mut query = gesture(Heading::Forward, 1000.6);
        query.last_valid_point = 1000.0;
        query.programmatic = true;
        assert_eq!(decide(&query), 2000.0);
    }

    #[test]
    fn test_still_heading_rounds_to_nearest() {
        assert_eq!(decide(&gesture(Heading::Still, 1400.0)), 1000.0);
        assert_eq!(decide(&gesture(Heading::Still, 1600.0)), 2000.0);
    }

    #[test]
    fn test_output_stays_in_bounds() {
        for heading in [Heading::Backward, Heading::Still, Heading::Forward] {
            for programmatic in [false, true] {
                for offset in [-500.0, 0.0, 10.0, 3990.0, 4000.0, 4700.0, 9000.0] {
                    let mut query = gesture(heading, offset);
                    query.programmatic = programmatic;
                    query.extent = 3500.0;
                    let target = decide(&query);
                    assert!((0.0..=3500.0).contains(&target), "{:?} {} -> {}", heading, offset, target);
                }
            }
        }
    }

    #[test]
    fn test_negative_extent_clamps_to_zero() {
        let mut query = gesture(Heading::Forward, 900.0);
        query.extent = -10.0;
        assert_eq!(decide(&query), 0.0);
    }
}
