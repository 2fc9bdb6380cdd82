//! Snap coordinator for one bound container
//!
//! [`ScrollSnap`] owns the container, a [`GestureTracker`] and one
//! [`AxisAnimator`] per axis, and moves through
//! `Idle -> Settling -> Snapping -> Idle`:
//!
//! * every scroll notification that moved an axis (re)arms the settle
//!   deadline and records where the sequence started,
//! * once the deadline passes the decision engine picks a target per axis and
//!   the animators take over, with scroll notifications ignored until both
//!   axes are idle again,
//! * when the last axis lands, the completion callback fires once.
//!
//! The host drives everything: it reports scrolls with [`ScrollSnap::on_scroll`]
//! and calls [`ScrollSnap::tick`] once per frame.

use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::animation::{AnimationTicket, AxisAnimator, ScrollTicket, StepOutcome};
use crate::bounds::{clamp, nearest_cell, round_to_nearest_snap_point};
use crate::config::{Settings, SnapConfig};
use crate::container::{ScrollContainer, Viewport};
use crate::decision::{decide, SnapQuery};
use crate::error::Result;
use crate::geometry::{Axis, AxisPair, Coordinates, Direction, Heading};
use crate::gesture::GestureTracker;
use crate::units::snap_length_px;

/// Where the coordinator is in a snap sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapPhase {
    /// Not bound to its container
    Unbound,
    /// Listening for scroll
    Idle,
    /// Scrolled, waiting for the settle deadline
    Settling,
    /// At least one axis animating
    Snapping,
}

impl std::fmt::Display for SnapPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SnapPhase::Unbound => "unbound",
            SnapPhase::Idle => "idle",
            SnapPhase::Settling => "settling",
            SnapPhase::Snapping => "snapping",
        };
        f.write_str(name)
    }
}

/// Notifications published on the optional event channel
#[derive(Debug, Clone, PartialEq)]
pub enum SnapEvent {
    /// The settle deadline fired and animations were started
    SnapStarted { targets: Coordinates },
    /// One axis reached its target
    AxisSettled { axis: Axis, offset: f64 },
    /// Every axis is idle again after a snap or a step
    SnapEnded { offset: AxisPair<f64> },
}

type SnapEndCallback = Box<dyn FnMut() + Send>;

/// Cell indices captured when the viewport was reported resized
#[derive(Debug, Clone, Copy)]
struct PendingResize {
    cells: AxisPair<Option<f64>>,
}

pub struct ScrollSnap<C> {
    container: C,
    settings: Settings,
    tracker: GestureTracker,
    animators: AxisPair<AxisAnimator>,
    /// Offset of the most recently confirmed snap cell per axis
    last_valid: AxisPair<f64>,
    /// Snap lengths as last resolved, `None` where the axis does not snap
    lengths: AxisPair<Option<f64>>,
    bound: bool,
    listening: bool,
    settle_deadline: Option<Instant>,
    scroll_start: Option<AxisPair<f64>>,
    /// The running sequence ends with a user notification
    notify_on_idle: bool,
    pending_resize: Option<PendingResize>,
    last_viewport: Viewport,
    snaps_completed: u64,
    on_snap_end: Option<SnapEndCallback>,
    events: Option<mpsc::UnboundedSender<SnapEvent>>,
}

impl<C: ScrollContainer> ScrollSnap<C> {
    /// Create an unbound coordinator
    pub fn new(container: C, settings: Settings) -> Self {
        let tracker = GestureTracker::new();
        Self {
            container,
            settings,
            tracker,
            animators: AxisPair::new(AxisAnimator::new(Axis::X), AxisAnimator::new(Axis::Y)),
            last_valid: AxisPair::splat(0.0),
            lengths: AxisPair::splat(None),
            bound: false,
            listening: false,
            settle_deadline: None,
            scroll_start: None,
            notify_on_idle: false,
            pending_resize: None,
            last_viewport: Viewport::default(),
            snaps_completed: 0,
            on_snap_end: None,
            events: None,
        }
    }

    /// Validate `config` and bind straight away
    pub fn from_config(container: C, config: &SnapConfig) -> Result<Self> {
        let settings = config.validate()?;
        let mut snap = Self::new(container, settings);
        snap.bind();
        Ok(snap)
    }

    /// Callback fired once every time a snap or step sequence completes
    pub fn on_snap_end(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_snap_end = Some(Box::new(callback));
        self
    }

    /// Publish [`SnapEvent`]s on a channel as well
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<SnapEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable access for host-side changes such as content or size updates
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn into_inner(mut self) -> C {
        self.unbind();
        self.container
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn phase(&self) -> SnapPhase {
        if !self.bound {
            SnapPhase::Unbound
        } else if self.is_animating() {
            SnapPhase::Snapping
        } else if self.settle_deadline.is_some() {
            SnapPhase::Settling
        } else {
            SnapPhase::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        Axis::BOTH.iter().any(|&axis| self.animators[axis].is_animating())
    }

    /// Whether the host should keep producing frames at animation rate
    pub fn needs_frames(&self) -> bool {
        self.is_animating() || self.pending_resize.is_some()
    }

    /// Earliest instant at which [`ScrollSnap::tick`] has timed work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.settle_deadline, self.tracker.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn last_valid_point(&self, axis: Axis) -> f64 {
        self.last_valid[axis]
    }

    /// Resolved snap length of an axis, `None` when it does not snap
    pub fn snap_length(&self, axis: Axis) -> Option<f64> {
        self.lengths[axis]
    }

    pub fn snaps_completed(&self) -> u64 {
        self.snaps_completed
    }

    /// Attach to the container and anchor on the nearest snap point
    pub fn bind(&mut self) {
        if self.bound {
            return;
        }
        self.refresh_lengths();
        for axis in Axis::BOTH {
            let offset = self.container.scroll_offset(axis);
            self.last_valid[axis] = match self.lengths[axis] {
                Some(length) => round_to_nearest_snap_point(offset, length),
                None => offset,
            };
        }
        self.last_viewport = self.container.viewport();
        self.bound = true;
        self.listening = true;
        debug!(lengths = ?self.lengths, "Snap bound");
    }

    /// Detach, cancelling animations without firing any notification
    pub fn unbind(&mut self) {
        if !self.bound {
            return;
        }
        for axis in Axis::BOTH {
            self.animators[axis].cancel();
        }
        self.tracker.clear();
        self.settle_deadline = None;
        self.scroll_start = None;
        self.pending_resize = None;
        self.notify_on_idle = false;
        self.listening = false;
        self.bound = false;
        debug!("Snap unbound");
    }

    /// Report that the container's offset changed
    ///
    /// Ignored while unbound, while an animation owns the container, and when
    /// neither axis moved since the last notification.
    pub fn on_scroll(&mut self, now: Instant) {
        if !self.bound || !self.listening {
            return;
        }

        let current = self.offsets();
        let deltas = current.map(|axis, value| self.tracker.record(axis, value, now));
        for axis in Axis::BOTH {
            self.tracker.steer(axis, deltas[axis]);
        }
        if deltas.x == 0.0 && deltas.y == 0.0 {
            return;
        }

        if self.scroll_start.is_none() {
            self.scroll_start = Some(current.map(|axis, value| value - deltas[axis]));
        }
        self.settle_deadline = Some(now + self.settings.timeout);
    }

    /// Scroll by `delta` on behalf of the user, the way a wheel or touchpad
    /// would, and report it
    pub fn scroll_by(&mut self, axis: Axis, delta: f64, now: Instant) {
        if !self.bound || !self.listening || !delta.is_finite() {
            return;
        }
        self.on_scroll(now);
        let offset = self.container.scroll_offset(axis);
        let max = self.container.max_scroll(axis);
        self.container.set_scroll_offset(axis, clamp(0.0, max, offset + delta));
        self.on_scroll(now);
    }

    /// Report that the viewport was resized; applied on the next frame
    pub fn on_resize(&mut self) {
        if !self.bound {
            return;
        }
        let mut cells = AxisPair::splat(None);
        for axis in Axis::BOTH {
            cells[axis] = self.lengths[axis]
                .map(|length| nearest_cell(self.container.scroll_offset(axis), length));
        }
        self.pending_resize = Some(PendingResize { cells });
    }

    /// One host frame: apply a pending resize, fire the settle deadline and
    /// advance the animators
    pub fn tick(&mut self, now: Instant) {
        if !self.bound {
            return;
        }

        if let Some(pending) = self.pending_resize.take() {
            self.apply_resize(pending);
        }

        if self.settle_deadline.is_some_and(|deadline| now >= deadline) {
            self.settle_deadline = None;
            self.settle();
        }

        self.tracker.expire(now);

        for axis in Axis::BOTH {
            if let StepOutcome::Finished(offset) = self.animators[axis].step(&mut self.container, now) {
                self.finish_axis(axis, offset);
            }
        }
    }

    /// Step exactly one cell in `direction`
    ///
    /// Returns `None` when the axis does not snap or is already animating.
    pub fn scroll_to_direction(&mut self, direction: Direction) -> Option<AnimationTicket> {
        let axis = direction.axis();
        if !self.bound || self.animators[axis].is_animating() {
            return None;
        }
        let length = snap_length_px(&self.container, axis, &self.settings.lengths[axis])?;
        self.lengths[axis] = Some(length);

        let heading = direction.heading();
        self.tracker.set_heading(axis, heading);
        let target = decide(&self.query(axis, heading, length, true));
        debug!(%direction, target, "Programmatic step");

        self.notify_on_idle = true;
        let target = match axis {
            Axis::X => Coordinates::x(target),
            Axis::Y => Coordinates::y(target),
        };
        self.start_axes(target).take(axis)
    }

    /// Arrow key entry point, honoured only when keyboard navigation is on
    pub fn on_arrow_key(&mut self, direction: Direction) -> Option<AnimationTicket> {
        if !self.settings.enable_keyboard {
            return None;
        }
        self.scroll_to_direction(direction)
    }

    /// Smoothly scroll to `target` on the axes it names
    ///
    /// Unlike snaps and steps this does not fire the completion callback.
    pub fn animate_to(&mut self, target: Coordinates) -> ScrollTicket {
        if !self.bound {
            return ScrollTicket::default();
        }
        let mut clamped = Coordinates::default();
        for axis in Axis::BOTH {
            let Some(offset) = target.get(axis) else {
                continue;
            };
            let offset = clamp(0.0, self.container.max_scroll(axis), offset);
            match axis {
                Axis::X => clamped.x = Some(offset),
                Axis::Y => clamped.y = Some(offset),
            }
        }
        self.start_axes(clamped)
    }

    fn offsets(&self) -> AxisPair<f64> {
        AxisPair::new(
            self.container.scroll_offset(Axis::X),
            self.container.scroll_offset(Axis::Y),
        )
    }

    fn refresh_lengths(&mut self) {
        for axis in Axis::BOTH {
            self.lengths[axis] = snap_length_px(&self.container, axis, &self.settings.lengths[axis]);
        }
    }

    fn query(&self, axis: Axis, heading: Heading, length: f64, programmatic: bool) -> SnapQuery {
        SnapQuery {
            heading,
            snap_length: length,
            current_offset: self.container.scroll_offset(axis),
            last_valid_point: self.last_valid[axis],
            extent: self.container.max_scroll(axis),
            policy: self.settings.policy,
            programmatic,
        }
    }

    /// Hand every axis named in `targets` to its animator, detaching the
    /// scroll listener
    ///
    /// Moves too short to animate complete on the spot, once all axes have
    /// been started, so a two-axis sequence still ends exactly once.
    fn start_axes(&mut self, targets: Coordinates) -> ScrollTicket {
        let mut ticket = ScrollTicket::default();
        let mut immediate = Vec::new();
        for axis in Axis::BOTH {
            let Some(target) = targets.get(axis) else {
                continue;
            };
            self.listening = false;
            let axis_ticket = self.animators[axis].animate(
                &self.container,
                target,
                self.settings.easing.clone(),
                self.settings.duration,
            );
            if axis_ticket.handle().is_none() {
                immediate.push((axis, target));
            }
            ticket.set(axis, axis_ticket);
        }
        for (axis, target) in immediate {
            self.finish_axis(axis, target);
        }
        ticket
    }

    /// Settle deadline fired
    fn settle(&mut self) {
        let Some(start) = self.scroll_start.take() else {
            return;
        };
        let current = self.offsets();
        if current == start {
            debug!("Scroll returned to its start, nothing to snap");
            for axis in Axis::BOTH {
                self.tracker.reset_heading(axis);
            }
            return;
        }

        self.refresh_lengths();
        let mut targets = Coordinates::default();
        for axis in Axis::BOTH {
            if self.animators[axis].is_animating() {
                continue;
            }
            let Some(length) = self.lengths[axis] else {
                continue;
            };
            let mut heading = self.tracker.heading(axis);
            if heading.is_still() {
                heading = Heading::from_delta(current[axis] - start[axis]);
            }
            if heading.is_still() {
                continue;
            }

            let target = decide(&self.query(axis, heading, length, false));
            match axis {
                Axis::X => targets.x = Some(target),
                Axis::Y => targets.y = Some(target),
            }
        }

        if targets == Coordinates::default() {
            debug!("No axis to snap");
            for axis in Axis::BOTH {
                self.tracker.reset_heading(axis);
            }
            return;
        }
        debug!(?targets, "Snapping");
        self.send_event(SnapEvent::SnapStarted { targets });

        self.notify_on_idle = true;
        // Completion is observed through `tick`
        let _ticket = self.start_axes(targets);
    }

    fn apply_resize(&mut self, pending: PendingResize) {
        self.refresh_lengths();
        let viewport = self.container.viewport();
        if viewport == self.last_viewport {
            return;
        }
        self.last_viewport = viewport;

        let mut target = Coordinates::default();
        for axis in Axis::BOTH {
            if let (Some(cell), Some(length)) = (pending.cells[axis], self.lengths[axis]) {
                match axis {
                    Axis::X => target.x = Some(cell * length),
                    Axis::Y => target.y = Some(cell * length),
                }
            }
        }
        debug!(?target, "Viewport resized, keeping snap cells");
        self.animate_to(target);
    }

    fn finish_axis(&mut self, axis: Axis, offset: f64) {
        debug!(%axis, offset, "Axis snapped");
        self.tracker.reset_heading(axis);
        self.last_valid[axis] = match self.lengths[axis] {
            Some(length) => round_to_nearest_snap_point(offset, length),
            None => offset,
        };
        self.send_event(SnapEvent::AxisSettled { axis, offset });
        if !self.is_animating() {
            self.become_idle();
        }
    }

    fn become_idle(&mut self) {
        self.listening = true;
        self.scroll_start = None;
        self.tracker.clear();
        if std::mem::take(&mut self.notify_on_idle) {
            self.snaps_completed += 1;
            let offset = self.offsets();
            self.send_event(SnapEvent::SnapEnded { offset });
            if let Some(callback) = self.on_snap_end.as_mut() {
                callback();
            }
        }
    }

    fn send_event(&self, event: SnapEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event).is_err() {
                warn!("Snap event receiver dropped");
            }
        }
    }
}

impl<C> std::fmt::Debug for ScrollSnap<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSnap")
            .field("settings", &self.settings)
            .field("bound", &self.bound)
            .field("listening", &self.listening)
            .field("last_valid", &self.last_valid)
            .field("lengths", &self.lengths)
            .field("animators", &self.animators)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::animation::TicketState;
    use crate::container::testing::MockContainer;
    use crate::units::SnapDestination;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn config() -> SnapConfig {
        SnapConfig {
            snap_destination_y: Some(SnapDestination::from("100%")),
            ..Default::default()
        }
    }

    fn bound(container: MockContainer, config: &SnapConfig) -> (ScrollSnap<MockContainer>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let snap = ScrollSnap::from_config(container, config)
            .unwrap()
            .on_snap_end(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        (snap, calls)
    }

    /// Tick every 16ms from `from` until `until` (inclusive of both ends)
    fn frames(snap: &mut ScrollSnap<MockContainer>, from: Instant, until: Instant) {
        let mut now = from;
        while now < until {
            snap.tick(now);
            now += ms(16);
        }
        snap.tick(until);
    }

    #[test]
    fn test_advances_past_threshold() {
        let (mut snap, calls) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        snap.scroll_by(Axis::Y, 850.0, t0);
        assert_eq!(snap.phase(), SnapPhase::Settling);

        snap.tick(t0 + ms(50));
        assert_eq!(snap.phase(), SnapPhase::Settling);

        snap.tick(t0 + ms(100));
        assert_eq!(snap.phase(), SnapPhase::Snapping);

        frames(&mut snap, t0 + ms(100), t0 + ms(400));
        assert_eq!(snap.container().offset.y, 1000.0);
        assert_eq!(snap.last_valid_point(Axis::Y), 1000.0);
        assert_eq!(snap.phase(), SnapPhase::Idle);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(snap.snaps_completed(), 1);
    }

    #[test]
    fn test_snaps_back_below_threshold() {
        let (mut snap, calls) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        snap.scroll_by(Axis::Y, 150.0, t0);
        frames(&mut snap, t0, t0 + ms(500));
        assert_eq!(snap.container().offset.y, 0.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_snap_stop_advances_one_cell() {
        let config = SnapConfig {
            snap_stop: true,
            ..config()
        };
        let (mut snap, _) = bound(MockContainer::square(), &config);
        let t0 = Instant::now();

        snap.scroll_by(Axis::Y, 1200.0, t0);
        snap.scroll_by(Axis::Y, 1300.0, t0 + ms(20));
        frames(&mut snap, t0 + ms(20), t0 + ms(600));
        assert_eq!(snap.container().offset.y, 1000.0);
    }

    #[test]
    fn test_settle_timer_is_rearmed_by_each_scroll() {
        let (mut snap, _) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        snap.scroll_by(Axis::Y, 300.0, t0);
        snap.tick(t0 + ms(80));
        snap.scroll_by(Axis::Y, 300.0, t0 + ms(80));
        snap.tick(t0 + ms(150));
        assert_eq!(snap.phase(), SnapPhase::Settling);
        snap.tick(t0 + ms(180));
        assert_eq!(snap.phase(), SnapPhase::Snapping);
    }

    #[test]
    fn test_notification_without_movement_keeps_deadline() {
        let (mut snap, calls) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        snap.scroll_by(Axis::Y, 850.0, t0);
        snap.on_scroll(t0 + ms(90));
        assert_eq!(snap.next_deadline(), Some(t0 + ms(100)));

        snap.tick(t0 + ms(100));
        assert_eq!(snap.phase(), SnapPhase::Snapping);
        frames(&mut snap, t0 + ms(100), t0 + ms(400));
        assert_eq!(snap.container().offset.y, 1000.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_notification_without_movement_stays_idle() {
        let (mut snap, calls) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        snap.on_scroll(t0);
        assert_eq!(snap.phase(), SnapPhase::Idle);

        frames(&mut snap, t0, t0 + ms(300));
        assert_eq!(snap.phase(), SnapPhase::Idle);
        assert!(snap.container().writes.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_animate_to_confirms_nearest_snap_point() {
        let (mut snap, _) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        snap.animate_to(Coordinates::y(1300.0));
        frames(&mut snap, t0, t0 + ms(400));
        assert_eq!(snap.container().offset.y, 1300.0);
        assert_eq!(snap.last_valid_point(Axis::Y), 1000.0);
    }

    #[test]
    fn test_returning_to_start_schedules_nothing() {
        let (mut snap, calls) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        snap.scroll_by(Axis::Y, 300.0, t0);
        snap.scroll_by(Axis::Y, -300.0, t0 + ms(10));
        snap.tick(t0 + ms(110));
        assert_eq!(snap.phase(), SnapPhase::Idle);
        assert_eq!(snap.container().writes.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_two_axes_end_once() {
        let config = SnapConfig {
            snap_destination_x: Some(SnapDestination::from("100%")),
            ..config()
        };
        let (mut snap, calls) = bound(MockContainer::square(), &config);
        let t0 = Instant::now();

        snap.scroll_by(Axis::X, 700.0, t0);
        snap.scroll_by(Axis::Y, 1900.0, t0);
        frames(&mut snap, t0, t0 + ms(600));

        assert_eq!(snap.container().offset.x, 1000.0);
        assert_eq!(snap.container().offset.y, 2000.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_axis_without_snap_length_is_left_alone() {
        let (mut snap, calls) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        snap.scroll_by(Axis::X, 420.0, t0);
        frames(&mut snap, t0, t0 + ms(500));
        assert_eq!(snap.container().offset.x, 420.0);
        assert_eq!(snap.phase(), SnapPhase::Idle);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_scroll_ignored_while_snapping() {
        let (mut snap, _) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        snap.scroll_by(Axis::Y, 850.0, t0);
        snap.tick(t0 + ms(100));
        assert!(snap.is_animating());

        let writes = snap.container().writes.len();
        snap.scroll_by(Axis::Y, -500.0, t0 + ms(120));
        assert_eq!(snap.container().writes.len(), writes);

        frames(&mut snap, t0 + ms(120), t0 + ms(500));
        assert_eq!(snap.container().offset.y, 1000.0);
    }

    #[test]
    fn test_direction_step_ignores_threshold() {
        let container = MockContainer::square().with_offset(Axis::Y, 500.0);
        let config = SnapConfig {
            threshold: 0.99,
            ..config()
        };
        let (mut snap, calls) = bound(container, &config);
        let t0 = Instant::now();

        let mut ticket = snap.scroll_to_direction(Direction::Down).unwrap();
        assert!(snap.scroll_to_direction(Direction::Up).is_none());

        frames(&mut snap, t0, t0 + ms(300));
        assert_eq!(ticket.state(), TicketState::Done(1000.0));
        assert_eq!(snap.container().offset.y, 1000.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_step_into_boundary_completes_at_once() {
        let (mut snap, calls) = bound(MockContainer::square(), &config());

        let mut ticket = snap.scroll_to_direction(Direction::Up).unwrap();
        assert!(ticket.handle().is_none());
        assert_eq!(ticket.state(), TicketState::Done(0.0));
        assert_eq!(snap.phase(), SnapPhase::Idle);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_step_on_axis_without_length() {
        let (mut snap, _) = bound(MockContainer::square(), &config());
        assert!(snap.scroll_to_direction(Direction::Right).is_none());
    }

    #[test]
    fn test_arrow_keys_respect_keyboard_setting() {
        let config = SnapConfig {
            enable_keyboard: false,
            ..config()
        };
        let (mut snap, _) = bound(MockContainer::square(), &config);
        assert!(snap.on_arrow_key(Direction::Down).is_none());
        assert!(snap.scroll_to_direction(Direction::Down).is_some());
    }

    #[test]
    fn test_unbind_cancels_without_notifying() {
        let (mut snap, calls) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        let mut ticket = snap.scroll_to_direction(Direction::Down).unwrap();
        snap.tick(t0);
        snap.tick(t0 + ms(100));
        snap.unbind();

        assert_eq!(snap.phase(), SnapPhase::Unbound);
        assert_eq!(ticket.state(), TicketState::Cancelled);
        let stopped_at = snap.container().offset.y;
        frames(&mut snap, t0 + ms(100), t0 + ms(500));
        assert_eq!(snap.container().offset.y, stopped_at);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        snap.scroll_by(Axis::Y, 100.0, t0 + ms(600));
        assert_eq!(snap.container().offset.y, stopped_at);
    }

    #[test]
    fn test_resize_keeps_cell_index() {
        let container = MockContainer::square().with_offset(Axis::Y, 2000.0);
        let (mut snap, calls) = bound(container, &config());
        assert_eq!(snap.snap_length(Axis::Y), Some(1000.0));

        snap.on_resize();
        {
            let container = snap.container_mut();
            container.client.y = 500.0;
            container.viewport = Viewport::new(1000.0, 500.0);
        }
        let t0 = Instant::now();
        frames(&mut snap, t0, t0 + ms(400));

        assert_eq!(snap.snap_length(Axis::Y), Some(500.0));
        assert_eq!(snap.container().offset.y, 1000.0);
        assert_eq!(snap.last_valid_point(Axis::Y), 1000.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resize_without_viewport_change_is_ignored() {
        let container = MockContainer::square().with_offset(Axis::Y, 2000.0);
        let (mut snap, _) = bound(container, &config());
        snap.on_resize();
        snap.tick(Instant::now());
        assert!(!snap.is_animating());
        assert!(snap.container().writes.is_empty());
    }

    #[test]
    fn test_animate_to_resolves_after_both_axes() {
        let (mut snap, calls) = bound(MockContainer::square(), &config());
        let t0 = Instant::now();

        let mut ticket = snap.animate_to(Coordinates::new(Some(300.0), Some(9000.0)));
        frames(&mut snap, t0, t0 + ms(300));

        assert_eq!(
            ticket.state(),
            TicketState::Done(Coordinates::new(Some(300.0), Some(4000.0)))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(snap.phase(), SnapPhase::Idle);
    }

    #[test]
    fn test_events_are_published() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut snap = ScrollSnap::from_config(MockContainer::square(), &config())
            .unwrap()
            .with_event_sender(tx);
        let t0 = Instant::now();

        snap.scroll_by(Axis::Y, 850.0, t0);
        frames(&mut snap, t0, t0 + ms(500));

        assert_eq!(
            rx.try_recv().unwrap(),
            SnapEvent::SnapStarted { targets: Coordinates::y(1000.0) }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            SnapEvent::AxisSettled { axis: Axis::Y, offset: 1000.0 }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            SnapEvent::SnapEnded { offset: AxisPair::new(0.0, 1000.0) }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_invalid_config_does_not_bind() {
        let config = SnapConfig {
            threshold: -0.5,
            ..config()
        };
        assert!(ScrollSnap::from_config(MockContainer::square(), &config).is_err());
    }

    #[test]
    fn test_bind_anchors_on_nearest_point() {
        let container = MockContainer::square().with_offset(Axis::Y, 1400.0);
        let (snap, _) = bound(container, &config());
        assert_eq!(snap.last_valid_point(Axis::Y), 1000.0);
        assert_eq!(snap.phase(), SnapPhase::Idle);
    }
}
