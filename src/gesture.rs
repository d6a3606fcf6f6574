//! Press recognition: turns a raw pointer stream into taps and hold
//! lifecycles.
//!
//! The animator downstream relies on a strict contract: hold events for one
//! physical press arrive as `Began`, zero or more `Changed`, then `Ended`,
//! exactly once each, and holds never nest. [`PressRecognizer`] upholds that
//! contract by construction — `Ended` is emitted iff `Began` was, and a
//! press displaced by drift past the slop radius emits nothing at all.

use std::time::{Duration, Instant};

/// Pointer input reduced to what press recognition needs. Only the primary
/// button is modeled; hosts filter other buttons before forwarding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down { x: f32, y: f32 },
    /// Pointer moved while tracked
    Moved { x: f32, y: f32 },
    /// Primary button released
    Up { x: f32, y: f32 },
}

/// Lifecycle of one physical hold. `Began` and `Ended` are paired and
/// delivered exactly once each; `Changed` carries no state of its own
/// (hold progress is a pure function of elapsed time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldPhase {
    Began,
    Changed,
    Ended,
}

/// A recognized gesture, ready for routing to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// A press released before the hold threshold, inside the bounds
    Tap,
    /// One event of a hold lifecycle
    Hold(HoldPhase),
}

/// Axis-aligned hit-test bounds for the recognized element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug)]
struct Press {
    started: Instant,
    origin: (f32, f32),
    /// True once `Began` has been emitted for this press
    holding: bool,
}

/// Converts pointer events over one element into [`Gesture`]s.
///
/// A press held past `min_press` (without drifting past the slop radius)
/// becomes a hold; a shorter press released in-bounds becomes a tap.
/// Promotion to a hold happens in [`PressRecognizer::poll`], which the host
/// frame loop calls each frame, so `Began` fires on time even when the
/// pointer is perfectly still.
pub struct PressRecognizer {
    bounds: Rect,
    min_press: Duration,
    slop: f32,
    press: Option<Press>,
}

impl PressRecognizer {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            min_press: Duration::from_millis(500),
            slop: 10.0,
            press: None,
        }
    }

    /// Set how long a press must last before it becomes a hold.
    pub fn min_press(mut self, duration: Duration) -> Self {
        self.min_press = duration;
        self
    }

    /// Set the drift radius (in the same units as the bounds) beyond which
    /// a pending press is abandoned.
    pub fn slop(mut self, radius: f32) -> Self {
        self.slop = radius;
        self
    }

    /// Update the hit-test bounds (e.g. after the host re-lays-out).
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Whether a press is currently tracked (pending or holding).
    pub fn is_tracking(&self) -> bool {
        self.press.is_some()
    }

    /// Feed a pointer event; returns the gesture it completes, if any.
    pub fn handle(&mut self, event: PointerEvent, now: Instant) -> Option<Gesture> {
        match event {
            PointerEvent::Down { x, y } => {
                if self.bounds.contains(x, y) {
                    if self.press.is_some() {
                        log::debug!("pointer down while a press is tracked; restarting");
                    }
                    self.press = Some(Press {
                        started: now,
                        origin: (x, y),
                        holding: false,
                    });
                }
                None
            }
            PointerEvent::Moved { x, y } => {
                let Some(press) = self.press.as_ref() else {
                    return None;
                };
                if press.holding {
                    return Some(Gesture::Hold(HoldPhase::Changed));
                }
                let dx = x - press.origin.0;
                let dy = y - press.origin.1;
                if dx * dx + dy * dy > self.slop * self.slop {
                    // Drifted out: this press will never become a gesture
                    self.press = None;
                    return None;
                }
                self.poll(now)
            }
            PointerEvent::Up { x, y } => {
                let press = self.press.take()?;
                if press.holding {
                    Some(Gesture::Hold(HoldPhase::Ended))
                } else if self.bounds.contains(x, y) {
                    Some(Gesture::Tap)
                } else {
                    None
                }
            }
        }
    }

    /// Promote a tracked press into a hold once `min_press` elapses.
    /// Emits `Began` at most once per press.
    pub fn poll(&mut self, now: Instant) -> Option<Gesture> {
        let press = self.press.as_mut()?;
        if !press.holding && now.duration_since(press.started) >= self.min_press {
            press.holding = true;
            return Some(Gesture::Hold(HoldPhase::Began));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> PressRecognizer {
        PressRecognizer::new(Rect::new(0.0, 0.0, 100.0, 100.0))
            .min_press(Duration::from_millis(200))
    }

    #[test]
    fn test_short_press_is_tap() {
        let mut rec = recognizer();
        let t0 = Instant::now();

        assert_eq!(rec.handle(PointerEvent::Down { x: 10.0, y: 10.0 }, t0), None);
        let up = rec.handle(
            PointerEvent::Up { x: 12.0, y: 11.0 },
            t0 + Duration::from_millis(80),
        );
        assert_eq!(up, Some(Gesture::Tap));
        assert!(!rec.is_tracking());
    }

    #[test]
    fn test_long_press_becomes_paired_hold() {
        let mut rec = recognizer();
        let t0 = Instant::now();

        rec.handle(PointerEvent::Down { x: 10.0, y: 10.0 }, t0);
        assert_eq!(rec.poll(t0 + Duration::from_millis(100)), None);
        assert_eq!(
            rec.poll(t0 + Duration::from_millis(250)),
            Some(Gesture::Hold(HoldPhase::Began))
        );
        // Began fires once, not every frame
        assert_eq!(rec.poll(t0 + Duration::from_millis(300)), None);

        assert_eq!(
            rec.handle(
                PointerEvent::Moved { x: 11.0, y: 10.0 },
                t0 + Duration::from_millis(350)
            ),
            Some(Gesture::Hold(HoldPhase::Changed))
        );
        assert_eq!(
            rec.handle(
                PointerEvent::Up { x: 11.0, y: 10.0 },
                t0 + Duration::from_millis(400)
            ),
            Some(Gesture::Hold(HoldPhase::Ended))
        );
    }

    #[test]
    fn test_drift_past_slop_cancels_press() {
        let mut rec = recognizer();
        let t0 = Instant::now();

        rec.handle(PointerEvent::Down { x: 10.0, y: 10.0 }, t0);
        assert_eq!(
            rec.handle(
                PointerEvent::Moved { x: 40.0, y: 10.0 },
                t0 + Duration::from_millis(50)
            ),
            None
        );
        assert!(!rec.is_tracking());
        // Release after the cancel produces nothing, so Ended never
        // arrives without a Began
        assert_eq!(
            rec.handle(
                PointerEvent::Up { x: 40.0, y: 10.0 },
                t0 + Duration::from_millis(500)
            ),
            None
        );
    }

    #[test]
    fn test_move_can_promote_to_hold() {
        let mut rec = recognizer();
        let t0 = Instant::now();

        rec.handle(PointerEvent::Down { x: 10.0, y: 10.0 }, t0);
        let moved = rec.handle(
            PointerEvent::Moved { x: 11.0, y: 10.0 },
            t0 + Duration::from_millis(250),
        );
        assert_eq!(moved, Some(Gesture::Hold(HoldPhase::Began)));
    }

    #[test]
    fn test_down_outside_bounds_ignored() {
        let mut rec = recognizer();
        let t0 = Instant::now();

        rec.handle(PointerEvent::Down { x: 150.0, y: 10.0 }, t0);
        assert!(!rec.is_tracking());
        assert_eq!(
            rec.handle(PointerEvent::Up { x: 150.0, y: 10.0 }, t0),
            None
        );
    }

    #[test]
    fn test_release_out_of_bounds_is_not_a_tap() {
        let mut rec = PressRecognizer::new(Rect::new(0.0, 0.0, 100.0, 100.0)).slop(500.0);
        let t0 = Instant::now();

        rec.handle(PointerEvent::Down { x: 10.0, y: 10.0 }, t0);
        let up = rec.handle(
            PointerEvent::Up { x: 150.0, y: 10.0 },
            t0 + Duration::from_millis(50),
        );
        assert_eq!(up, None);
    }
}
