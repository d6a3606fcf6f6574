//! The committed side of the toggle: one boolean display state and the
//! pop transition that moves between its two looks.
//!
//! [`ToggleController`] is the single writer of the committed state. Taps
//! arrive through [`ToggleController::toggle`]; a hold that reaches its
//! threshold arrives through [`ToggleController::commit`] — both run the
//! same transition path, and `focused` flips only when the pop settles.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crate::animation::{Animatable, Transition};
use crate::playback::{PlaybackHandle, Settled};

/// The authoritative boolean display state of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleState {
    pub focused: bool,
}

/// Visual endpoints of the pop transition: element scale, corner shape,
/// and the dimming overlay's visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopStyle {
    pub scale: f32,
    pub corner_radius: f32,
    pub overlay_alpha: f32,
}

impl PopStyle {
    /// Resting look of the unfocused element.
    pub fn collapsed() -> Self {
        Self {
            scale: 1.0,
            corner_radius: 12.0,
            overlay_alpha: 0.0,
        }
    }

    /// Popped-open look: grown, squared off, with the overlay dimming
    /// everything behind it.
    pub fn expanded() -> Self {
        Self {
            scale: 1.8,
            corner_radius: 0.0,
            overlay_alpha: 0.6,
        }
    }
}

impl Animatable for PopStyle {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            scale: from.scale + (to.scale - from.scale) * t,
            corner_radius: from.corner_radius + (to.corner_radius - from.corner_radius) * t,
            overlay_alpha: from.overlay_alpha + (to.overlay_alpha - from.overlay_alpha) * t,
        }
    }
}

type RaiseCallback = Box<dyn FnMut()>;

/// Owns [`ToggleState`] and the pop transition driving it.
pub struct ToggleController {
    state: ToggleState,
    /// Target to write into `state` when the running pop settles
    pending: Option<bool>,
    collapsed: PopStyle,
    expanded: PopStyle,
    /// (from, to) endpoints of the cycle in flight, read by the effect
    endpoints: Rc<RefCell<(PopStyle, PopStyle)>>,
    current: Rc<RefCell<PopStyle>>,
    handle: PlaybackHandle,
    on_raise: Option<RaiseCallback>,
}

impl ToggleController {
    /// Controller with the stock collapsed/expanded looks.
    pub fn new(transition: Transition) -> Self {
        Self::with_styles(PopStyle::collapsed(), PopStyle::expanded(), transition)
    }

    pub fn with_styles(collapsed: PopStyle, expanded: PopStyle, transition: Transition) -> Self {
        let current = Rc::new(RefCell::new(collapsed));
        let endpoints = Rc::new(RefCell::new((collapsed, collapsed)));
        let mut handle = PlaybackHandle::new(transition);
        {
            let endpoints = endpoints.clone();
            let current = current.clone();
            handle.register_effect(move |t| {
                let (from, to) = *endpoints.borrow();
                *current.borrow_mut() = PopStyle::lerp(&from, &to, t);
            });
        }
        Self {
            state: ToggleState::default(),
            pending: None,
            collapsed,
            expanded,
            endpoints,
            current,
            handle,
            on_raise: None,
        }
    }

    /// Callback invoked before each transition so the host can bring the
    /// element and its overlay to the front of the stack.
    pub fn on_raise<F: FnMut() + 'static>(mut self, f: F) -> Self {
        self.on_raise = Some(Box::new(f));
        self
    }

    pub fn focused(&self) -> bool {
        self.state.focused
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    /// Interpolated look of the element at the last tick.
    pub fn style(&self) -> PopStyle {
        *self.current.borrow()
    }

    pub fn is_animating(&self) -> bool {
        self.handle.is_animating()
    }

    /// Flip toward the opposite of the committed state. Always valid; the
    /// implied target is read at call time. A tap landing while a pop is
    /// still in flight reads the not-yet-flipped state, so it converges
    /// with the running transition instead of fighting it.
    pub fn toggle(&mut self, now: Instant) {
        let target = !self.state.focused;
        self.commit(target, now);
    }

    /// Run the pop transition toward an explicit target state.
    ///
    /// Valid even when the target equals the current state — the transition
    /// still plays (callers are expected to check state first when that
    /// matters). The transition always departs from the current
    /// interpolated look, so an interrupting commit never jumps.
    pub fn commit(&mut self, to_focused: bool, now: Instant) {
        if let Some(raise) = self.on_raise.as_mut() {
            raise();
        }
        let from = *self.current.borrow();
        let to = if to_focused {
            self.expanded
        } else {
            self.collapsed
        };
        *self.endpoints.borrow_mut() = (from, to);
        self.pending = Some(to_focused);
        log::debug!("pop transition toward focused={}", to_focused);
        // A pop already in flight is displaced; the new target owns the outcome
        let _ = self.handle.start(now);
    }

    /// Advance the pop transition. The committed state flips only when the
    /// cycle settles at its end. Returns whether the pop is still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(Settled::End) = self.handle.tick(now) {
            if let Some(target) = self.pending.take() {
                self.state.focused = target;
                log::debug!("committed focused={}", target);
            }
        }
        self.handle.is_animating()
    }
}
