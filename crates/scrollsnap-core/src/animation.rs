//! Per-axis snap animation
//!
//! An [`AxisAnimator`] owns the write side of one scroll offset while it is
//! animating. The host advances it once per frame with [`AxisAnimator::step`].
//! Every animation hands back an [`AnimationTicket`] that resolves exactly
//! once with the final offset, or never resolves successfully if the
//! animation is cancelled or replaced.

use std::num::NonZeroU64;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::trace;

use crate::container::ScrollContainer;
use crate::easing::Easing;
use crate::geometry::{Axis, AxisPair, Coordinates};
use crate::timing::{is_complete, lerp, progress};

/// Moves shorter than this are not worth a frame
pub const MIN_ANIMATED_DISTANCE: f64 = 1.0;

/// Opaque handle of an in-flight animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(NonZeroU64);

impl FrameHandle {
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

/// Where a ticket stands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TicketState<T = f64> {
    /// Animation still running
    Pending,
    /// Finished at this position
    Done(T),
    /// Cancelled or replaced before finishing
    Cancelled,
}

/// Completion side of one animation
#[derive(Debug)]
pub struct AnimationTicket {
    handle: Option<FrameHandle>,
    rx: oneshot::Receiver<f64>,
    settled: Option<TicketState>,
}

impl AnimationTicket {
    /// Frame handle of the animation, `None` when it completed without
    /// scheduling any frame
    pub fn handle(&self) -> Option<FrameHandle> {
        self.handle
    }

    /// Poll without blocking
    pub fn state(&mut self) -> TicketState {
        if let Some(settled) = self.settled {
            return settled;
        }
        let state = match self.rx.try_recv() {
            Ok(offset) => TicketState::Done(offset),
            Err(TryRecvError::Empty) => return TicketState::Pending,
            Err(TryRecvError::Closed) => TicketState::Cancelled,
        };
        self.settled = Some(state);
        state
    }

    /// Wait for the animation; `None` if it was cancelled
    pub async fn finished(self) -> Option<f64> {
        match self.settled {
            Some(TicketState::Done(offset)) => Some(offset),
            Some(_) => None,
            None => self.rx.await.ok(),
        }
    }
}

/// Completion side of a move that may involve both axes
///
/// Resolves once every participating axis has finished. If any of them is
/// cancelled the whole move counts as cancelled.
#[derive(Debug, Default)]
pub struct ScrollTicket {
    axes: AxisPair<Option<AnimationTicket>>,
}

impl ScrollTicket {
    pub(crate) fn set(&mut self, axis: Axis, ticket: AnimationTicket) {
        self.axes[axis] = Some(ticket);
    }

    pub(crate) fn take(&mut self, axis: Axis) -> Option<AnimationTicket> {
        self.axes[axis].take()
    }

    /// Whether an axis takes part in the move
    pub fn involves(&self, axis: Axis) -> bool {
        self.axes[axis].is_some()
    }

    pub fn state(&mut self) -> TicketState<Coordinates> {
        let mut done = Coordinates::default();
        let mut pending = false;
        for axis in Axis::BOTH {
            let Some(ticket) = self.axes[axis].as_mut() else {
                continue;
            };
            match ticket.state() {
                TicketState::Cancelled => return TicketState::Cancelled,
                TicketState::Pending => pending = true,
                TicketState::Done(offset) => match axis {
                    Axis::X => done.x = Some(offset),
                    Axis::Y => done.y = Some(offset),
                },
            }
        }
        if pending {
            TicketState::Pending
        } else {
            TicketState::Done(done)
        }
    }

    /// Wait for every involved axis; `None` if any was cancelled
    pub async fn finished(self) -> Option<Coordinates> {
        let AxisPair { x, y } = self.axes;
        let x = match x {
            Some(ticket) => Some(ticket.finished().await?),
            None => None,
        };
        let y = match y {
            Some(ticket) => Some(ticket.finished().await?),
            None => None,
        };
        Some(Coordinates::new(x, y))
    }
}

/// Result of advancing an animator by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Nothing in flight
    Idle,
    /// Still moving toward the target
    Running,
    /// Reached the target on this frame
    Finished(f64),
}

struct ActiveAnimation {
    handle: FrameHandle,
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
    /// Set on the first frame
    started_at: Option<Instant>,
    /// Last offset actually written
    last_position: f64,
    done: oneshot::Sender<f64>,
}

/// Drives one scroll axis toward a target
pub struct AxisAnimator {
    axis: Axis,
    active: Option<ActiveAnimation>,
    handles_issued: u64,
}

impl AxisAnimator {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            active: None,
            handles_issued: 0,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Handle of the animation in flight, if any
    pub fn handle(&self) -> Option<FrameHandle> {
        self.active.as_ref().map(|a| a.handle)
    }

    /// Target of the animation in flight
    pub fn target(&self) -> Option<f64> {
        self.active.as_ref().map(|a| a.to)
    }

    /// Start animating toward `target`, replacing whatever was in flight
    ///
    /// A move shorter than [`MIN_ANIMATED_DISTANCE`], or a non-finite target,
    /// completes immediately without scheduling a frame.
    pub fn animate<C>(
        &mut self,
        container: &C,
        target: f64,
        easing: Easing,
        duration: Duration,
    ) -> AnimationTicket
    where
        C: ScrollContainer + ?Sized,
    {
        self.cancel();

        let (tx, rx) = oneshot::channel();
        let from = container.scroll_offset(self.axis);

        if !target.is_finite() || (from - target).abs() < MIN_ANIMATED_DISTANCE {
            let settled_at = if target.is_finite() { target } else { from };
            let _ = tx.send(settled_at);
            return AnimationTicket {
                handle: None,
                rx,
                settled: None,
            };
        }

        self.handles_issued += 1;
        let handle = FrameHandle(NonZeroU64::MIN.saturating_add(self.handles_issued - 1));
        trace!(axis = %self.axis, from, to = target, handle = handle.get(), "Axis animation scheduled");

        self.active = Some(ActiveAnimation {
            handle,
            from,
            to: target,
            duration,
            easing,
            started_at: None,
            last_position: from,
            done: tx,
        });

        AnimationTicket {
            handle: Some(handle),
            rx,
            settled: None,
        }
    }

    /// Advance the animation by one frame
    pub fn step<C>(&mut self, container: &mut C, now: Instant) -> StepOutcome
    where
        C: ScrollContainer + ?Sized,
    {
        let Some(anim) = self.active.as_mut() else {
            return StepOutcome::Idle;
        };

        let started_at = *anim.started_at.get_or_insert(now);

        if !is_complete(started_at, now, anim.duration) {
            let t = progress(started_at, now, anim.duration);
            let next = lerp(anim.from, anim.to, anim.easing.apply(t));
            // Only ever move closer to the target
            if (anim.to - next).abs() < (anim.to - anim.last_position).abs() {
                container.set_scroll_offset(self.axis, next);
                anim.last_position = next;
            }
            return StepOutcome::Running;
        }

        let Some(anim) = self.active.take() else {
            return StepOutcome::Idle;
        };
        container.set_scroll_offset(self.axis, anim.to);
        let _ = anim.done.send(anim.to);
        trace!(axis = %self.axis, to = anim.to, "Axis animation finished");
        StepOutcome::Finished(anim.to)
    }

    /// Stop the animation in flight without resolving its ticket
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(anim) => {
                trace!(axis = %self.axis, handle = anim.handle.get(), "Axis animation cancelled");
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for AxisAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisAnimator")
            .field("axis", &self.axis)
            .field("handle", &self.handle())
            .field("target", &self.target())
            .finish()
    }
}
