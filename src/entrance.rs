//! One-shot entrance animations.
//!
//! An [`Entrance`] drives a value from its off-screen (or hidden) look to
//! its resting look exactly once, reporting completion on the tick it
//! finishes so the host can chain follow-up entrances. There is no shared
//! state with the toggle machinery; these are fire-and-forget.

use std::time::Instant;

use crate::animation::{Animatable, SpringState, TimingFunction, Transform, Transition};

/// A single fire-and-forget animation from one value to another.
pub struct Entrance<T: Animatable> {
    from: T,
    to: T,
    transition: Transition,
    current: T,
    started: Option<Instant>,
    spring: Option<SpringState>,
    finished: bool,
}

impl<T: Animatable> Entrance<T> {
    pub fn new(from: T, to: T, transition: Transition) -> Self {
        let current = from.clone();
        Self {
            from,
            to,
            transition,
            current,
            started: None,
            spring: None,
            finished: false,
        }
    }

    /// Begin (or restart) the animation. The delay in the transition, if
    /// any, counts from here.
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
        self.finished = false;
        self.current = self.from.clone();
        self.spring = match self.transition.timing {
            TimingFunction::Spring(_) => Some(SpringState::new()),
            _ => None,
        };
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some() && !self.finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The interpolated value at the last tick.
    pub fn value(&self) -> &T {
        &self.current
    }

    /// Advance the animation. Returns `true` exactly once: on the tick the
    /// entrance finishes (the chaining hook).
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(started) = self.started else {
            return false;
        };
        if self.finished {
            return false;
        }

        let elapsed_ms = now.duration_since(started).as_secs_f32() * 1000.0;
        let adjusted_ms = (elapsed_ms - self.transition.delay_ms).max(0.0);
        if adjusted_ms <= 0.0 {
            // Still in the delay window
            return false;
        }

        match (&mut self.spring, &self.transition.timing) {
            (Some(state), TimingFunction::Spring(config)) => {
                let position = state.step(adjusted_ms / 1000.0, config);
                self.current = T::lerp(&self.from, &self.to, position);
                if state.is_settled(0.01) || adjusted_ms >= self.transition.duration_ms {
                    self.current = self.to.clone();
                    self.finished = true;
                    return true;
                }
                false
            }
            _ => {
                let t = (adjusted_ms / self.transition.duration_ms.max(1e-3)).min(1.0);
                self.current = T::lerp(&self.from, &self.to, self.transition.timing.evaluate(t));
                if t >= 1.0 {
                    self.current = self.to.clone();
                    self.finished = true;
                    return true;
                }
                false
            }
        }
    }
}

impl Entrance<(f32, f32)> {
    /// Slide in from an off-screen offset to the resting position,
    /// eased over `duration_ms`.
    pub fn slide_in(offset: (f32, f32), duration_ms: f32) -> Self {
        Self::new(
            offset,
            (0.0, 0.0),
            Transition::new(duration_ms, TimingFunction::EaseInOut),
        )
    }
}

impl Entrance<f32> {
    /// Cross-dissolve reveal: alpha 0 to 1 at constant speed.
    pub fn fade_in(duration_ms: f32) -> Self {
        Self::new(0.0, 1.0, Transition::new(duration_ms, TimingFunction::Linear))
    }
}

impl Entrance<Transform> {
    /// Grow from nothing to full size with a springy overshoot.
    pub fn scale_in(damping_ratio: f32, response_secs: f32) -> Self {
        Self::new(
            Transform::scale_uniform(0.0),
            Transform::IDENTITY,
            Transition::spring(crate::animation::SpringConfig::with_damping_ratio(
                damping_ratio,
                response_secs,
            )),
        )
    }
}
