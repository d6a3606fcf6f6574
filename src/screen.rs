//! The demo screen: wires the entrance choreography, the background
//! cross-fade, and the tap/hold toggle control into one host object with a
//! single frame-loop entry point.
//!
//! Everything here is composition; the interesting state lives in
//! [`ToggleController`] and [`HoldPreviewAnimator`]. All events and ticks
//! run on one logical control thread.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::animation::{Transform, Transition};
use crate::color::Color;
use crate::crossfade::ColorLoop;
use crate::entrance::Entrance;
use crate::gesture::{Gesture, PointerEvent, PressRecognizer, Rect};
use crate::hold::HoldPreviewAnimator;
use crate::toggle::{PopStyle, ToggleController};

/// Everything the screen needs from the host's layout pass.
pub struct ScreenConfig {
    /// Hit-test bounds of the toggleable element
    pub element_bounds: Rect,
    /// Logical screen width, used for off-screen slide offsets
    pub width: f32,
    /// Hold duration required before a preview may commit
    pub hold_threshold: Duration,
    /// Press duration before a press becomes a hold
    pub min_press: Duration,
    /// Background cross-fade endpoint colors
    pub background: (Color, Color),
    /// Title text colors toggled by the cross-dissolve
    pub text_colors: (Color, Color),
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            element_bounds: Rect::new(108.0, 320.0, 160.0, 120.0),
            width: 375.0,
            hold_threshold: Duration::from_millis(500),
            min_press: Duration::from_millis(150),
            background: (
                Color::rgb(170.0 / 255.0, 224.0 / 255.0, 226.0 / 255.0),
                Color::rgb(226.0 / 255.0, 226.0 / 255.0, 170.0 / 255.0),
            ),
            text_colors: (Color::BLACK, Color::rgb(0.85, 0.3, 0.1)),
        }
    }
}

/// One screen's worth of animated elements and their controllers.
pub struct Screen {
    toggle: ToggleController,
    hold: HoldPreviewAnimator,
    recognizer: PressRecognizer,
    /// Set by the toggle's raise callback; the host reads it to fix z-order
    element_raised: Rc<Cell<bool>>,

    // Entrance choreography, chained off the welcome slide-in
    welcome: Entrance<(f32, f32)>,
    subtitle: Entrance<f32>,
    museum: Entrance<(f32, f32)>,
    skip: Entrance<Transform>,
    skip_alpha: Entrance<f32>,

    background: ColorLoop,

    text_colors: (Color, Color),
    text_color: Entrance<Color>,
    text_on_alt: bool,

    presented: bool,
}

/// Duration shared by the entrance animations, matching the original
/// choreography's 0.7 s appearance beat.
const APPEARANCE_MS: f32 = 700.0;

impl Screen {
    pub fn new(config: ScreenConfig) -> Self {
        let element_raised = Rc::new(Cell::new(false));
        let raise_flag = element_raised.clone();
        let toggle = ToggleController::new(Transition::default())
            .on_raise(move || raise_flag.set(true));

        let (bg_a, bg_b) = config.background;
        let (text_a, _) = config.text_colors;

        Self {
            toggle,
            hold: HoldPreviewAnimator::new(config.hold_threshold),
            recognizer: PressRecognizer::new(config.element_bounds).min_press(config.min_press),
            element_raised,
            welcome: Entrance::slide_in((-config.width, 0.0), APPEARANCE_MS),
            subtitle: Entrance::fade_in(APPEARANCE_MS),
            museum: Entrance::new(
                (config.width, 0.0),
                (0.0, 0.0),
                Transition::new(APPEARANCE_MS, crate::animation::TimingFunction::EaseInOut)
                    .delay(250.0),
            ),
            skip: Entrance::scale_in(0.5, 0.7),
            skip_alpha: Entrance::fade_in(APPEARANCE_MS),
            background: ColorLoop::new(bg_a, bg_b, Duration::from_millis(1500)),
            text_colors: config.text_colors,
            text_color: Entrance::new(
                text_a,
                text_a,
                Transition::new(250.0, crate::animation::TimingFunction::Linear),
            ),
            text_on_alt: false,
            presented: false,
        }
    }

    /// Kick off the entrance choreography: the welcome slide begins at
    /// once, the background cross-fade loops from here on, and the
    /// remaining entrances chain off the slide's completion.
    pub fn present(&mut self, now: Instant) {
        if self.presented {
            return;
        }
        self.presented = true;
        log::info!("presenting screen");
        self.welcome.start(now);
        self.background.start(now);
    }

    /// Feed a pointer event from the host's input layer.
    pub fn handle_event(&mut self, event: PointerEvent, now: Instant) {
        if let Some(gesture) = self.recognizer.handle(event, now) {
            self.route(gesture, now);
        }
    }

    /// Cross-dissolve the title text to its other color.
    pub fn toggle_text_color(&mut self, now: Instant) {
        self.text_on_alt = !self.text_on_alt;
        let target = if self.text_on_alt {
            self.text_colors.1
        } else {
            self.text_colors.0
        };
        self.text_color = Entrance::new(
            *self.text_color.value(),
            target,
            Transition::new(250.0, crate::animation::TimingFunction::Linear),
        );
        self.text_color.start(now);
    }

    /// Advance one frame. Returns whether anything still needs frames.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.welcome.tick(now) {
            // Chain the rest of the choreography off the slide-in, the
            // image entrances carrying their own short delay
            self.subtitle.start(now);
            self.museum.start(now);
            self.skip.start(now);
            self.skip_alpha.start(now);
        }
        let _ = self.subtitle.tick(now);
        let _ = self.museum.tick(now);
        let _ = self.skip.tick(now);
        let _ = self.skip_alpha.tick(now);
        let _ = self.text_color.tick(now);

        if let Some(gesture) = self.recognizer.poll(now) {
            self.route(gesture, now);
        }
        self.hold.tick(now, &mut self.toggle);
        self.toggle.tick(now);

        self.welcome.is_running()
            || self.subtitle.is_running()
            || self.museum.is_running()
            || self.skip.is_running()
            || self.skip_alpha.is_running()
            || self.text_color.is_running()
            || self.hold.is_animating()
            || self.toggle.is_animating()
            || self.recognizer.is_tracking()
            || self.background.is_running()
    }

    fn route(&mut self, gesture: Gesture, now: Instant) {
        match gesture {
            Gesture::Tap => {
                log::debug!("tap on toggle element");
                self.toggle.toggle(now);
            }
            Gesture::Hold(phase) => self.hold.on_hold(phase, now, &mut self.toggle),
        }
    }

    // Host-facing views of the animated state

    pub fn focused(&self) -> bool {
        self.toggle.focused()
    }

    /// Committed element look (pop transition output).
    pub fn element_style(&self) -> PopStyle {
        self.toggle.style()
    }

    /// Uncommitted hold preview applied on top of the element style.
    pub fn preview_transform(&self) -> Transform {
        self.hold.preview_transform()
    }

    /// Hold progress toward the commit threshold, 0..=100.
    pub fn hold_progress(&self, now: Instant) -> f32 {
        self.hold.progress(now)
    }

    /// Whether the element has been raised to the front of the stack.
    pub fn element_raised(&self) -> bool {
        self.element_raised.get()
    }

    pub fn background_color(&self, now: Instant) -> Color {
        self.background.color_at(now)
    }

    pub fn text_color(&self) -> Color {
        *self.text_color.value()
    }

    /// Welcome label offset from its resting position.
    pub fn welcome_offset(&self) -> (f32, f32) {
        *self.welcome.value()
    }

    pub fn subtitle_alpha(&self) -> f32 {
        *self.subtitle.value()
    }

    /// Museum image offset from its resting position.
    pub fn museum_offset(&self) -> (f32, f32) {
        *self.museum.value()
    }

    pub fn skip_transform(&self) -> Transform {
        Transform {
            scale: self.skip.value().scale,
            ..Transform::IDENTITY
        }
    }

    pub fn skip_alpha(&self) -> f32 {
        *self.skip_alpha.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(screen: &mut Screen, from: Instant, duration: Duration) -> Instant {
        let mut now = from;
        let end = from + duration;
        while now < end {
            now += Duration::from_millis(16);
            screen.tick(now);
        }
        now
    }

    #[test]
    fn test_entrances_chain_off_welcome() {
        let mut screen = Screen::new(ScreenConfig::default());
        let t0 = Instant::now();
        screen.present(t0);

        assert_eq!(screen.welcome_offset(), (-375.0, 0.0));
        assert_eq!(screen.subtitle_alpha(), 0.0);

        // Welcome finishes around 700ms; followers start only then
        run(&mut screen, t0, Duration::from_millis(400));
        assert_eq!(screen.subtitle_alpha(), 0.0);

        run(&mut screen, t0 + Duration::from_millis(400), Duration::from_secs(3));
        assert_eq!(screen.welcome_offset(), (0.0, 0.0));
        assert_eq!(screen.subtitle_alpha(), 1.0);
        assert_eq!(screen.museum_offset(), (0.0, 0.0));
        assert_eq!(screen.skip_alpha(), 1.0);
        assert_eq!(screen.skip_transform().scale, (1.0, 1.0));
    }

    #[test]
    fn test_present_is_one_shot() {
        let mut screen = Screen::new(ScreenConfig::default());
        let t0 = Instant::now();
        screen.present(t0);
        run(&mut screen, t0, Duration::from_secs(1));
        let offset_mid = screen.welcome_offset();

        // A second present must not restart the choreography
        screen.present(t0 + Duration::from_secs(1));
        assert_eq!(screen.welcome_offset(), offset_mid);
    }

    #[test]
    fn test_tap_toggles_and_raises_element() {
        let mut screen = Screen::new(ScreenConfig::default());
        let t0 = Instant::now();
        screen.present(t0);
        assert!(!screen.element_raised());

        screen.handle_event(PointerEvent::Down { x: 150.0, y: 350.0 }, t0);
        screen.handle_event(
            PointerEvent::Up { x: 150.0, y: 350.0 },
            t0 + Duration::from_millis(60),
        );
        assert!(screen.element_raised());

        run(&mut screen, t0 + Duration::from_millis(60), Duration::from_secs(3));
        assert!(screen.focused());
    }

    #[test]
    fn test_hold_to_commit_through_the_screen() {
        let mut screen = Screen::new(ScreenConfig::default());
        let t0 = Instant::now();
        screen.present(t0);

        screen.handle_event(PointerEvent::Down { x: 150.0, y: 350.0 }, t0);
        // min_press 150ms + threshold 500ms: hold for 800ms total
        let held = run(&mut screen, t0, Duration::from_millis(800));
        screen.handle_event(PointerEvent::Up { x: 150.0, y: 350.0 }, held);

        run(&mut screen, held, Duration::from_secs(3));
        assert!(screen.focused());
    }

    #[test]
    fn test_short_hold_through_the_screen_cancels() {
        let mut screen = Screen::new(ScreenConfig::default());
        let t0 = Instant::now();
        screen.present(t0);

        screen.handle_event(PointerEvent::Down { x: 150.0, y: 350.0 }, t0);
        // Past min_press so it becomes a hold, but well short of threshold
        let held = run(&mut screen, t0, Duration::from_millis(300));
        screen.handle_event(PointerEvent::Up { x: 150.0, y: 350.0 }, held);

        run(&mut screen, held, Duration::from_secs(2));
        assert!(!screen.focused());
        assert_eq!(screen.preview_transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_text_color_cross_dissolves() {
        let mut screen = Screen::new(ScreenConfig::default());
        let t0 = Instant::now();
        let base = screen.text_color();

        screen.toggle_text_color(t0);
        run(&mut screen, t0, Duration::from_secs(1));
        assert_ne!(screen.text_color(), base);

        screen.toggle_text_color(t0 + Duration::from_secs(1));
        run(&mut screen, t0 + Duration::from_secs(1), Duration::from_secs(1));
        assert_eq!(screen.text_color(), base);
    }

    #[test]
    fn test_background_keeps_requesting_frames() {
        let mut screen = Screen::new(ScreenConfig::default());
        let t0 = Instant::now();
        screen.present(t0);

        let now = run(&mut screen, t0, Duration::from_secs(5));
        // Choreography is long done, but the loop still wants frames
        assert!(screen.tick(now + Duration::from_millis(16)));
    }
}
