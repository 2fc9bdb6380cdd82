//! Per-axis scroll sampling and direction inference
//!
//! A gesture is a burst of scroll notifications on one axis. Samples older
//! than [`QUIET_PERIOD`] are forgotten, so the first notification of the next
//! burst reports a zero delta instead of a jump measured against a stale
//! position. That is enough to tell discrete wheel ticks apart from
//! continuous momentum scrolling without a full gesture recogniser.

use std::time::{Duration, Instant};

use crate::geometry::{Axis, AxisPair, Heading};

/// Time without samples after which an axis returns to idle
pub const QUIET_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, Default)]
struct AxisSamples {
    /// Last sampled offset, `None` while idle
    last: Option<f64>,
    /// When `last` expires
    quiet_deadline: Option<Instant>,
    /// Inferred direction of the current gesture
    heading: Heading,
}

/// Gesture state for one bound container
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    axes: AxisPair<AxisSamples>,
    quiet_period: Option<Duration>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a quiet period other than [`QUIET_PERIOD`]
    pub fn with_quiet_period(mut self, period: Duration) -> Self {
        self.quiet_period = Some(period);
        self
    }

    fn quiet_period(&self) -> Duration {
        self.quiet_period.unwrap_or(QUIET_PERIOD)
    }

    /// Record a new offset sample and return the signed delta against the
    /// previous one (zero when the axis was idle)
    pub fn record(&mut self, axis: Axis, value: f64, now: Instant) -> f64 {
        let period = self.quiet_period();
        let samples = &mut self.axes[axis];

        let delta = samples.last.map(|last| value - last).unwrap_or(0.0);
        samples.last = Some(value);
        samples.quiet_deadline = Some(now + period);
        delta
    }

    /// Drop samples whose quiet period has elapsed
    ///
    /// Returns the axes that went idle on this call.
    pub fn expire(&mut self, now: Instant) -> Vec<Axis> {
        let mut expired = Vec::new();
        for axis in Axis::BOTH {
            let samples = &mut self.axes[axis];
            if samples.quiet_deadline.is_some_and(|deadline| now >= deadline) {
                samples.last = None;
                samples.quiet_deadline = None;
                expired.push(axis);
            }
        }
        expired
    }

    /// Whether an axis currently holds a live sample
    pub fn is_sampling(&self, axis: Axis) -> bool {
        self.axes[axis].last.is_some()
    }

    /// Earliest pending quiet deadline, for hosts that sleep between frames
    pub fn next_deadline(&self) -> Option<Instant> {
        Axis::BOTH
            .iter()
            .filter_map(|&axis| self.axes[axis].quiet_deadline)
            .min()
    }

    /// Adopt the direction of a non-zero delta as the axis heading
    pub fn steer(&mut self, axis: Axis, delta: f64) {
        let heading = Heading::from_delta(delta);
        if !heading.is_still() {
            self.axes[axis].heading = heading;
        }
    }

    /// Force a heading, used for programmatic steps
    pub fn set_heading(&mut self, axis: Axis, heading: Heading) {
        self.axes[axis].heading = heading;
    }

    pub fn heading(&self, axis: Axis) -> Heading {
        self.axes[axis].heading
    }

    /// Forget the heading of an axis once its snap has finished
    pub fn reset_heading(&mut self, axis: Axis) {
        self.axes[axis].heading = Heading::Still;
    }

    /// Return every axis to idle
    pub fn clear(&mut self) {
        self.axes = AxisPair::default();
    }
}
