//! Looping autoreverse color cross-fade.
//!
//! [`ColorLoop`] sweeps between two colors forever, reversing direction at
//! each end. The color is a pure function of elapsed time — nothing is
//! accumulated frame to frame, so irregular tick delivery cannot make the
//! loop drift.

use std::time::{Duration, Instant};

use crate::animation::{Animatable, TimingFunction};
use crate::color::Color;

/// A repeating, autoreversing cross-fade between two colors.
pub struct ColorLoop {
    a: Color,
    b: Color,
    /// Time for one directional sweep (a to b, or b back to a)
    sweep: Duration,
    timing: TimingFunction,
    started: Option<Instant>,
}

impl ColorLoop {
    pub fn new(a: Color, b: Color, sweep: Duration) -> Self {
        Self {
            a,
            b,
            sweep,
            timing: TimingFunction::EaseInOut,
            started: None,
        }
    }

    /// Override the per-sweep timing curve.
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn stop(&mut self) {
        self.started = None;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// The loop's color at `now`. Before `start` this is the first color.
    pub fn color_at(&self, now: Instant) -> Color {
        let Some(started) = self.started else {
            return self.a;
        };
        let elapsed = now.duration_since(started).as_secs_f32();
        let sweep = self.sweep.as_secs_f32().max(1e-3);
        let phase = elapsed / sweep;
        let sweeps_completed = phase.floor();
        let within = phase - sweeps_completed;
        // Odd sweeps run backward (autoreverse)
        let t = if (sweeps_completed as u64) % 2 == 0 {
            within
        } else {
            1.0 - within
        };
        Color::lerp(&self.a, &self.b, self.timing.evaluate(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teal_yellow() -> ColorLoop {
        ColorLoop::new(
            Color::rgb(170.0 / 255.0, 224.0 / 255.0, 226.0 / 255.0),
            Color::rgb(226.0 / 255.0, 226.0 / 255.0, 170.0 / 255.0),
            Duration::from_millis(1500),
        )
    }

    #[test]
    fn test_first_color_before_start() {
        let cross = teal_yellow();
        assert_eq!(cross.color_at(Instant::now()), cross.a);
    }

    #[test]
    fn test_full_sweep_reaches_second_color() {
        let mut cross = teal_yellow();
        let t0 = Instant::now();
        cross.start(t0);

        assert_eq!(cross.color_at(t0), cross.a);
        let at_sweep = cross.color_at(t0 + Duration::from_millis(1500));
        assert!((at_sweep.r - cross.b.r).abs() < 1e-3);
        assert!((at_sweep.b - cross.b.b).abs() < 1e-3);
    }

    #[test]
    fn test_autoreverse_returns_to_first_color() {
        let mut cross = teal_yellow();
        let t0 = Instant::now();
        cross.start(t0);

        let after_round_trip = cross.color_at(t0 + Duration::from_millis(3000));
        assert!((after_round_trip.r - cross.a.r).abs() < 1e-3);
        assert!((after_round_trip.b - cross.a.b).abs() < 1e-3);
    }

    #[test]
    fn test_color_is_pure_function_of_time() {
        let mut cross = teal_yellow();
        let t0 = Instant::now();
        cross.start(t0);

        let sample = t0 + Duration::from_millis(700);
        // Asking twice, or out of order, changes nothing
        let first = cross.color_at(sample);
        let _ = cross.color_at(t0 + Duration::from_millis(2900));
        assert_eq!(cross.color_at(sample), first);
    }
}
