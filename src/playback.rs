//! Reusable playback handles for interruptible property animations.
//!
//! A [`PlaybackHandle`] drives a single 0..1 cycle fraction through a
//! registered effect callback. It is constructed once and reused across
//! gestures; between gestures it is [`PlaybackState::Idle`]. A cycle can be
//! started, reversed mid-flight, stopped without discarding its completion,
//! and forced to settle at either endpoint. Each cycle settles exactly once,
//! and the settle outcome ([`Settled`]) is reported from the frame-loop
//! `tick` (or returned directly by `finish_at`/`start`), never from the
//! rendering step.

use std::time::Instant;

use crate::animation::{SpringState, TimingFunction, Transition};

/// The two endpoints a playback cycle can settle at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The cycle's starting value (fraction 0.0)
    Start,
    /// The cycle's final value (fraction 1.0)
    End,
}

/// One-shot outcome of a playback cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The cycle came to rest at its start endpoint (reversed out)
    Start,
    /// The cycle came to rest at its end endpoint
    End,
    /// The cycle was displaced mid-flight by a new `start`; the new
    /// cycle owns the outcome
    Interrupted,
}

/// Lifecycle state of a [`PlaybackHandle`].
///
/// `Idle` is both the initial and the terminal state between gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No live cycle
    Idle,
    /// Playing forward toward the end endpoint
    Running,
    /// Playing backward toward the start endpoint
    Reversing,
    /// Halted mid-flight with the completion still armed, awaiting
    /// a `finish_at`
    StoppedAwaitingFinish,
}

type Effect = Box<dyn FnMut(f32)>;

/// An opaque, reusable handle to a driven animatable value.
///
/// The handle owns the cycle bookkeeping only; the animated value itself
/// lives wherever the registered effect writes it. All methods that depend
/// on time take `now` explicitly so the host frame loop is the single
/// clock source.
pub struct PlaybackHandle {
    transition: Transition,
    effect: Option<Effect>,
    state: PlaybackState,
    /// Linear cycle fraction at the last update (0.0 = start, 1.0 = end)
    fraction: f32,
    /// Fraction the current leg departed from (a reverse leg departs from
    /// wherever the forward leg was displaced)
    leg_from: f32,
    leg_started: Option<Instant>,
    spring: Option<SpringState>,
}

impl PlaybackHandle {
    pub fn new(transition: Transition) -> Self {
        Self {
            transition,
            effect: None,
            state: PlaybackState::Idle,
            fraction: 0.0,
            leg_from: 0.0,
            leg_started: None,
            spring: None,
        }
    }

    /// Register the applied effect, at most once. Later calls are ignored
    /// so a preview effect survives across gestures without re-registration.
    pub fn register_effect<F: FnMut(f32) + 'static>(&mut self, f: F) {
        if self.effect.is_none() {
            self.effect = Some(Box::new(f));
        }
    }

    /// Whether an effect has been registered.
    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Linear cycle fraction at the last update.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Whether playback is live (running or reversing).
    pub fn is_animating(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Running | PlaybackState::Reversing
        )
    }

    /// Begin a forward cycle from the start endpoint.
    ///
    /// Starting while a cycle is live is a caller-contract violation (one
    /// hold session at a time); the live cycle is displaced and its
    /// completion is delivered as [`Settled::Interrupted`], then playback
    /// restarts from fraction 0.
    pub fn start(&mut self, now: Instant) -> Option<Settled> {
        let displaced = if self.state == PlaybackState::Idle {
            None
        } else {
            log::warn!(
                "playback started while {:?}; displacing the live cycle",
                self.state
            );
            Some(Settled::Interrupted)
        };

        self.fraction = 0.0;
        self.leg_from = 0.0;
        self.leg_started = Some(now);
        self.spring = match self.transition.timing {
            TimingFunction::Spring(_) => Some(SpringState::new()),
            _ => None,
        };
        self.state = PlaybackState::Running;
        self.apply(0.0);
        displaced
    }

    /// Play backward from the current fraction toward the start endpoint.
    /// The armed completion fires with [`Settled::Start`] when the reverse
    /// leg arrives. No-op when the handle is idle.
    pub fn reverse(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Idle | PlaybackState::Reversing => {}
            PlaybackState::Running | PlaybackState::StoppedAwaitingFinish => {
                self.leg_from = self.current_fraction(now);
                self.fraction = self.leg_from;
                self.leg_started = Some(now);
                self.spring = None;
                self.state = PlaybackState::Reversing;
            }
        }
    }

    /// Halt playback at the current fraction. With
    /// `discard_completion = false` the cycle stays armed
    /// ([`PlaybackState::StoppedAwaitingFinish`]) so a later `finish_at`
    /// settles it; with `true` the cycle ends silently.
    pub fn stop(&mut self, now: Instant, discard_completion: bool) {
        if self.state == PlaybackState::Idle {
            return;
        }
        self.fraction = self.current_fraction(now);
        self.leg_from = self.fraction;
        self.leg_started = None;
        self.spring = None;
        self.state = if discard_completion {
            PlaybackState::Idle
        } else {
            PlaybackState::StoppedAwaitingFinish
        };
    }

    /// Force the live cycle to settle at an endpoint, applying the effect's
    /// final frame deterministically. Returns the settle outcome, or `None`
    /// when no cycle is armed (a cycle settles at most once).
    pub fn finish_at(&mut self, endpoint: Endpoint) -> Option<Settled> {
        if self.state == PlaybackState::Idle {
            return None;
        }
        Some(self.settle(endpoint))
    }

    /// Advance playback. Returns the settle outcome when the cycle
    /// naturally reaches an endpoint this tick.
    pub fn tick(&mut self, now: Instant) -> Option<Settled> {
        match self.state {
            PlaybackState::Idle | PlaybackState::StoppedAwaitingFinish => None,
            PlaybackState::Running => {
                if self.spring.is_some() {
                    self.tick_spring(now)
                } else {
                    let t = self.leg_t(now);
                    self.fraction = self.leg_from + (1.0 - self.leg_from) * t;
                    if t >= 1.0 {
                        Some(self.settle(Endpoint::End))
                    } else {
                        let eased = self.transition.timing.evaluate(self.fraction);
                        self.apply(eased);
                        None
                    }
                }
            }
            PlaybackState::Reversing => {
                let t = self.leg_t(now);
                self.fraction = self.leg_from * (1.0 - t);
                if t >= 1.0 {
                    Some(self.settle(Endpoint::Start))
                } else {
                    let eased = self.transition.timing.evaluate(self.fraction);
                    self.apply(eased);
                    None
                }
            }
        }
    }

    fn tick_spring(&mut self, now: Instant) -> Option<Settled> {
        let Some(started) = self.leg_started else {
            return None;
        };
        let elapsed_ms = now.duration_since(started).as_secs_f32() * 1000.0;
        let adjusted_ms = (elapsed_ms - self.transition.delay_ms).max(0.0);
        if adjusted_ms <= 0.0 {
            return None;
        }

        let (position, settled) = match (&mut self.spring, &self.transition.timing) {
            (Some(state), TimingFunction::Spring(config)) => {
                let pos = state.step(adjusted_ms / 1000.0, config);
                (pos, state.is_settled(0.01))
            }
            // Spring state only exists for spring timing
            _ => (1.0, true),
        };

        self.fraction = self.leg_from + (1.0 - self.leg_from) * position;
        if settled || adjusted_ms >= self.transition.duration_ms {
            Some(self.settle(Endpoint::End))
        } else {
            // Spring position is the eased value, overshoot included
            self.apply(self.fraction);
            None
        }
    }

    /// Normalized progress of the current leg, clamped to 0..1.
    fn leg_t(&self, now: Instant) -> f32 {
        let Some(started) = self.leg_started else {
            return 0.0;
        };
        let mut elapsed_ms = now.duration_since(started).as_secs_f32() * 1000.0;
        // Delay applies only to a fresh forward cycle, not to reversals
        if self.state == PlaybackState::Running && self.leg_from == 0.0 {
            elapsed_ms = (elapsed_ms - self.transition.delay_ms).max(0.0);
        }
        let leg_duration = match self.state {
            PlaybackState::Running => self.transition.duration_ms * (1.0 - self.leg_from),
            PlaybackState::Reversing => self.transition.duration_ms * self.leg_from,
            _ => return 0.0,
        };
        (elapsed_ms / leg_duration.max(1e-3)).clamp(0.0, 1.0)
    }

    /// Linear fraction at `now`, without mutating playback state.
    fn current_fraction(&self, now: Instant) -> f32 {
        match self.state {
            PlaybackState::Running if self.spring.is_none() => {
                self.leg_from + (1.0 - self.leg_from) * self.leg_t(now)
            }
            PlaybackState::Reversing => self.leg_from * (1.0 - self.leg_t(now)),
            // Springs are stepped in tick(); use the last stepped fraction
            _ => self.fraction,
        }
    }

    fn settle(&mut self, endpoint: Endpoint) -> Settled {
        let (fraction, outcome) = match endpoint {
            Endpoint::Start => (0.0, Settled::Start),
            Endpoint::End => (1.0, Settled::End),
        };
        self.fraction = fraction;
        self.leg_from = fraction;
        self.leg_started = None;
        self.spring = None;
        self.state = PlaybackState::Idle;
        // Final frame lands exactly on the endpoint, bypassing easing
        self.apply(fraction);
        log::trace!("playback settled at {:?}", endpoint);
        outcome
    }

    fn apply(&mut self, value: f32) {
        if let Some(effect) = self.effect.as_mut() {
            effect(value);
        }
    }
}
