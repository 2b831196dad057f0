//! Camera animation: easing, sampled transitions, and the tick scheduler seam.
//!
//! An animated transition is not a thread. The [`Animator`] asks a
//! [`Scheduler`] for a tick, the host calls back into the engine when that
//! tick fires, and each tick samples the eased camera and asks for the next
//! one until `t = 1`. Starting a new transition cancels the pending tick of
//! the previous one outright; only one transition can be in flight.

#[cfg(test)]
#[path = "anim_test.rs"]
mod anim_test;

use crate::camera::Camera;

/// Quadratic ease-in-out. Input is clamped to `[0, 1]`.
#[must_use]
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// One transition from `from` to `to`, started at `start_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAnimation {
    pub from: Camera,
    pub to: Camera,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl CameraAnimation {
    #[must_use]
    pub fn new(from: Camera, to: Camera, start_ms: f64, duration_ms: f64) -> Self {
        Self { from, to, start_ms, duration_ms: duration_ms.max(0.0) }
    }

    /// Linear progress in `[0, 1]` at `now_ms`. Zero-length transitions are
    /// complete immediately.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Camera at linear progress `t`, with easing applied.
    #[must_use]
    pub fn sample_at(&self, t: f64) -> Camera {
        let e = ease_in_out_quad(t);
        Camera {
            zoom: lerp(self.from.zoom, self.to.zoom, e),
            pan_x: lerp(self.from.pan_x, self.to.pan_x, e),
            pan_y: lerp(self.from.pan_y, self.to.pan_y, e),
        }
    }

    /// Camera at wall-clock time `now_ms`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> Camera {
        self.sample_at(self.progress(now_ms))
    }
}

/// Opaque handle for a scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Capability to request a future callback into the engine.
///
/// Implementations may be backed by a timer, an event-loop tick, or a thread
/// that sleeps. A scheduler with no render surface returns `None`.
pub trait Scheduler {
    /// Ask for one tick roughly `delay_ms` from now.
    fn schedule(&mut self, delay_ms: f64) -> Option<TickHandle>;

    /// Withdraw a previously scheduled tick. Unknown handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Host-driven scheduler: records requests and lets the host drain them.
///
/// Used by tests and by headless drivers that own their own clock.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<(TickHandle, f64)>,
    unavailable: bool,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler that refuses every request, as when no surface is attached.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    /// Ticks requested and not yet drained or cancelled, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[(TickHandle, f64)] {
        &self.pending
    }

    /// Remove and return the oldest pending tick.
    pub fn pop(&mut self) -> Option<(TickHandle, f64)> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.pending.remove(0))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: f64) -> Option<TickHandle> {
        if self.unavailable {
            return None;
        }
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.pending.push((handle, delay_ms));
        Some(handle)
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}

/// Result of delivering a tick to the [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The tick belongs to a superseded or finished transition.
    Stale,
    /// Intermediate eased camera; another tick has been requested.
    Running(Camera),
    /// Transition complete; carries the exact target camera.
    Finished(Camera),
}

/// Owns the single in-flight camera transition.
#[derive(Debug, Default)]
pub struct Animator {
    active: Option<(CameraAnimation, TickHandle)>,
    tick_ms: f64,
}

impl Animator {
    #[must_use]
    pub fn new(tick_ms: f64) -> Self {
        Self { active: None, tick_ms }
    }

    /// The transition currently in flight.
    #[must_use]
    pub fn active(&self) -> Option<&CameraAnimation> {
        self.active.as_ref().map(|(anim, _)| anim)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Start `anim`, replacing any transition in flight.
    ///
    /// Returns `false` when the scheduler could not provide a tick; nothing is
    /// left in flight in that case.
    pub fn start(&mut self, anim: CameraAnimation, scheduler: &mut impl Scheduler) -> bool {
        self.cancel(scheduler);
        let Some(handle) = scheduler.schedule(self.tick_ms) else {
            return false;
        };
        self.active = Some((anim, handle));
        true
    }

    /// Drop the transition in flight, withdrawing its pending tick.
    pub fn cancel(&mut self, scheduler: &mut impl Scheduler) {
        if let Some((_, handle)) = self.active.take() {
            scheduler.cancel(handle);
        }
    }

    /// Advance the transition for a fired tick.
    pub fn tick(&mut self, handle: TickHandle, now_ms: f64, scheduler: &mut impl Scheduler) -> TickOutcome {
        let Some((anim, current)) = self.active else {
            return TickOutcome::Stale;
        };
        if current != handle {
            return TickOutcome::Stale;
        }
        if anim.progress(now_ms) >= 1.0 {
            self.active = None;
            return TickOutcome::Finished(anim.to);
        }
        let cam = anim.sample(now_ms);
        match scheduler.schedule(self.tick_ms) {
            Some(next) => {
                self.active = Some((anim, next));
                TickOutcome::Running(cam)
            }
            None => {
                tracing::warn!("scheduler stopped mid-transition; committing target");
                self.active = None;
                TickOutcome::Finished(anim.to)
            }
        }
    }
}
