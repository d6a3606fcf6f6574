//! Press-and-hold preview of the toggle's expand transition.
//!
//! A hold grows the element toward a slight scale as a live, cancelable
//! preview. Releasing early reverses the preview back out; holding to the
//! threshold commits the expansion through the same
//! [`ToggleController::commit`] path taps use. The animator owns one
//! [`PlaybackHandle`] for its whole lifetime and never mutates the
//! committed state directly — the settle outcome of the playback cycle is
//! the only thing that can trigger a commit, which keeps a racing release
//! and a completing preview from ever double-committing.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::animation::{Animatable, TimingFunction, Transform, Transition};
use crate::gesture::HoldPhase;
use crate::playback::{Endpoint, PlaybackHandle, Settled};
use crate::toggle::ToggleController;

/// One live hold. Exists only strictly between `Began` and `Ended`;
/// holds cannot nest, so there is at most one at a time.
#[derive(Debug, Clone, Copy)]
pub struct HoldSession {
    pub started: Instant,
}

/// Drives the reversible preview animation for one toggle element.
pub struct HoldPreviewAnimator {
    threshold: Duration,
    session: Option<HoldSession>,
    /// Percent captured at the instant the current cycle's outcome was
    /// decided (release, or natural completion mid-hold). The settle
    /// handler re-checks this value, not a fresh clock read — the session
    /// is already cleared by the time a release's settle arrives.
    decided_progress: f32,
    /// Local preview bookkeeping; never a substitute for the committed state
    preview_focused: bool,
    preview_scale: f32,
    preview: Rc<RefCell<Transform>>,
    handle: PlaybackHandle,
}

impl HoldPreviewAnimator {
    /// `threshold` is both the commit threshold and the preview's duration,
    /// so a hold that reaches full scale is exactly a hold that may commit.
    pub fn new(threshold: Duration) -> Self {
        let duration_ms = threshold.as_secs_f32().max(1e-3) * 1000.0;
        Self {
            threshold,
            session: None,
            decided_progress: 0.0,
            preview_focused: false,
            preview_scale: 1.1,
            preview: Rc::new(RefCell::new(Transform::IDENTITY)),
            handle: PlaybackHandle::new(Transition::new(duration_ms, TimingFunction::EaseOut)),
        }
    }

    /// Override the grown preview scale. Only effective before the first
    /// hold registers the preview effect.
    pub fn preview_scale(mut self, scale: f32) -> Self {
        self.preview_scale = scale;
        self
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// The preview transform at the last update, for the host to apply to
    /// the element's visual.
    pub fn preview_transform(&self) -> Transform {
        *self.preview.borrow()
    }

    pub fn is_animating(&self) -> bool {
        self.handle.is_animating()
    }

    /// Whether a hold is live right now.
    pub fn is_holding(&self) -> bool {
        self.session.is_some()
    }

    /// Hold progress toward the commit threshold, as a percent in 0..=100.
    /// Purely a function of elapsed time — never accumulated per event —
    /// and 0 whenever no session is live.
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(session) = &self.session else {
            return 0.0;
        };
        let elapsed = now.duration_since(session.started).as_secs_f32();
        (elapsed / self.threshold.as_secs_f32().max(1e-3)).clamp(0.0, 1.0) * 100.0
    }

    /// Feed one hold lifecycle event.
    ///
    /// The committed state is only ever touched through
    /// `toggle.commit(true, ..)`, and only from the settle handler.
    pub fn on_hold(&mut self, phase: HoldPhase, now: Instant, toggle: &mut ToggleController) {
        match phase {
            HoldPhase::Began => self.hold_began(now, toggle),
            // Progress is derived from elapsed time, so sparse or dense
            // event delivery changes nothing here
            HoldPhase::Changed => {}
            HoldPhase::Ended => self.hold_ended(now, toggle),
        }
    }

    /// Advance the preview playback. Natural completion of a held preview
    /// settles at the end endpoint and commits from the settle handler,
    /// exactly as a threshold release does.
    pub fn tick(&mut self, now: Instant, toggle: &mut ToggleController) -> bool {
        if let Some(settled) = self.handle.tick(now) {
            if settled == Settled::End {
                self.decided_progress = self.progress(now);
            }
            self.playback_settled(settled, now, toggle);
        }
        self.handle.is_animating()
    }

    fn hold_began(&mut self, now: Instant, toggle: &mut ToggleController) {
        if toggle.focused() {
            // Already expanded: the commit path owns that state. A hold here
            // only parks any stray preview at its start endpoint; the rest
            // of this lifecycle is ignored because no session is created.
            log::trace!("hold began while focused; no preview");
            if let Some(settled) = self.handle.finish_at(Endpoint::Start) {
                self.playback_settled(settled, now, toggle);
            }
            return;
        }

        self.ensure_effect();
        self.decided_progress = 0.0;
        self.session = Some(HoldSession { started: now });
        log::debug!("hold began; previewing toward {}x", self.preview_scale);
        if let Some(displaced) = self.handle.start(now) {
            // Overlapping holds violate the recognizer contract; the handle
            // has already logged and restarted
            self.playback_settled(displaced, now, toggle);
        }
    }

    fn hold_ended(&mut self, now: Instant, toggle: &mut ToggleController) {
        if self.session.is_none() {
            return;
        }
        let progress = self.progress(now);
        self.decided_progress = progress;
        // Session ends whether the hold commits or cancels
        self.session = None;

        if progress >= 100.0 {
            log::debug!("hold released at threshold; forcing finish at end");
            // Stop without discarding the completion, then settle the final
            // frame deterministically; the settle handler performs the
            // commit, never the release event itself
            self.handle.stop(now, false);
            if let Some(settled) = self.handle.finish_at(Endpoint::End) {
                self.playback_settled(settled, now, toggle);
            }
        } else {
            log::debug!("hold released at {:.0}%; reversing preview", progress);
            self.handle.reverse(now);
        }
    }

    /// Single-shot continuation for each playback cycle, keyed by the
    /// endpoint the cycle settled at.
    fn playback_settled(&mut self, settled: Settled, now: Instant, toggle: &mut ToggleController) {
        match settled {
            Settled::Start => {
                self.preview_focused = false;
            }
            Settled::End => {
                if self.decided_progress >= 100.0 {
                    toggle.commit(true, now);
                } else {
                    // The handle landed at the end without the hold reaching
                    // the threshold (displaced-and-rushed cycle); treat as
                    // preview bookkeeping, not a commit
                    self.preview_focused = false;
                }
            }
            Settled::Interrupted => {
                // The next gesture's transitions own the outcome
            }
        }
    }

    fn ensure_effect(&mut self) {
        if self.handle.has_effect() {
            return;
        }
        let preview = self.preview.clone();
        let grown = Transform::scale_uniform(self.preview_scale);
        self.handle.register_effect(move |t| {
            *preview.borrow_mut() = Transform::lerp(&Transform::IDENTITY, &grown, t);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const THRESHOLD: Duration = Duration::from_millis(500);

    fn fixtures() -> (HoldPreviewAnimator, ToggleController, Rc<Cell<u32>>) {
        let commits = Rc::new(Cell::new(0u32));
        let counter = commits.clone();
        let toggle = ToggleController::new(Transition::new(
            100.0,
            TimingFunction::Linear,
        ))
        .on_raise(move || counter.set(counter.get() + 1));
        (HoldPreviewAnimator::new(THRESHOLD), toggle, commits)
    }

    /// Tick both controllers frame by frame from `from` to `to`.
    fn run(
        hold: &mut HoldPreviewAnimator,
        toggle: &mut ToggleController,
        from: Instant,
        duration: Duration,
    ) -> Instant {
        let mut now = from;
        let end = from + duration;
        while now < end {
            now += Duration::from_millis(16);
            hold.tick(now, toggle);
            toggle.tick(now);
        }
        now
    }

    #[test]
    fn test_progress_is_zero_without_session() {
        let (hold, _, _) = fixtures();
        assert_eq!(hold.progress(Instant::now()), 0.0);
    }

    #[test]
    fn test_progress_tracks_elapsed_time() {
        let (mut hold, mut toggle, _) = fixtures();
        let t0 = Instant::now();
        hold.on_hold(HoldPhase::Began, t0, &mut toggle);

        assert!((hold.progress(t0 + Duration::from_millis(250)) - 50.0).abs() < 1.0);
        assert_eq!(hold.progress(t0 + Duration::from_millis(900)), 100.0);
    }

    #[test]
    fn test_release_before_threshold_reverses_to_start() {
        let (mut hold, mut toggle, commits) = fixtures();
        let t0 = Instant::now();

        hold.on_hold(HoldPhase::Began, t0, &mut toggle);
        let released = run(&mut hold, &mut toggle, t0, Duration::from_millis(200));
        let mid_scale = hold.preview_transform().scale.0;
        assert!(mid_scale > 1.0, "preview should have grown, got {}", mid_scale);

        hold.on_hold(HoldPhase::Ended, released, &mut toggle);
        assert!(!hold.is_holding());

        run(&mut hold, &mut toggle, released, Duration::from_secs(1));
        assert!(!toggle.focused());
        assert_eq!(hold.preview_transform(), Transform::IDENTITY);
        assert_eq!(commits.get(), 0);
    }

    #[test]
    fn test_release_past_threshold_commits_once() {
        let (mut hold, mut toggle, commits) = fixtures();
        let t0 = Instant::now();

        hold.on_hold(HoldPhase::Began, t0, &mut toggle);
        let released = run(&mut hold, &mut toggle, t0, Duration::from_millis(600));
        hold.on_hold(HoldPhase::Ended, released, &mut toggle);

        run(&mut hold, &mut toggle, released, Duration::from_secs(1));
        assert!(toggle.focused());
        assert_eq!(commits.get(), 1);
    }

    #[test]
    fn test_sparse_ticks_still_commit_on_release() {
        let (mut hold, mut toggle, commits) = fixtures();
        let t0 = Instant::now();

        // No tick between Began and Ended; progress is derived, not
        // accumulated, so the release still sees 100%
        hold.on_hold(HoldPhase::Began, t0, &mut toggle);
        hold.on_hold(
            HoldPhase::Ended,
            t0 + Duration::from_millis(600),
            &mut toggle,
        );

        run(
            &mut hold,
            &mut toggle,
            t0 + Duration::from_millis(600),
            Duration::from_secs(1),
        );
        assert!(toggle.focused());
        assert_eq!(commits.get(), 1);
    }

    #[test]
    fn test_changed_events_have_no_effect_on_outcome() {
        let (mut hold, mut toggle, _) = fixtures();
        let t0 = Instant::now();

        hold.on_hold(HoldPhase::Began, t0, &mut toggle);
        for i in 1..20 {
            hold.on_hold(
                HoldPhase::Changed,
                t0 + Duration::from_millis(i * 10),
                &mut toggle,
            );
        }
        hold.on_hold(
            HoldPhase::Ended,
            t0 + Duration::from_millis(200),
            &mut toggle,
        );

        run(
            &mut hold,
            &mut toggle,
            t0 + Duration::from_millis(200),
            Duration::from_secs(1),
        );
        assert!(!toggle.focused());
    }

    #[test]
    fn test_hold_while_focused_is_inert() {
        let (mut hold, mut toggle, commits) = fixtures();
        let t0 = Instant::now();

        // Commit through a tap first
        toggle.toggle(t0);
        let rest = run(&mut hold, &mut toggle, t0, Duration::from_secs(1));
        assert!(toggle.focused());
        let commits_before = commits.get();

        hold.on_hold(HoldPhase::Began, rest, &mut toggle);
        assert!(!hold.is_holding());
        assert_eq!(hold.preview_transform(), Transform::IDENTITY);

        hold.on_hold(HoldPhase::Ended, rest + Duration::from_secs(1), &mut toggle);
        run(
            &mut hold,
            &mut toggle,
            rest + Duration::from_secs(1),
            Duration::from_secs(1),
        );
        assert!(toggle.focused());
        assert_eq!(commits.get(), commits_before);
    }

    #[test]
    fn test_natural_completion_midhold_commits_exactly_once() {
        let (mut hold, mut toggle, commits) = fixtures();
        let t0 = Instant::now();

        hold.on_hold(HoldPhase::Began, t0, &mut toggle);
        // Keep holding well past the threshold; the preview completes
        // naturally and commits from its settle handler
        let now = run(&mut hold, &mut toggle, t0, Duration::from_millis(900));
        assert_eq!(commits.get(), 1);

        // The release that follows must not commit again
        hold.on_hold(HoldPhase::Ended, now, &mut toggle);
        run(&mut hold, &mut toggle, now, Duration::from_secs(1));
        assert!(toggle.focused());
        assert_eq!(commits.get(), 1);
    }

    #[test]
    fn test_overlapping_began_restarts_preview() {
        let (mut hold, mut toggle, commits) = fixtures();
        let t0 = Instant::now();

        hold.on_hold(HoldPhase::Began, t0, &mut toggle);
        let mid = run(&mut hold, &mut toggle, t0, Duration::from_millis(300));

        // Contract violation: a second Began with no Ended in between.
        // The new session wins and times from its own start.
        hold.on_hold(HoldPhase::Began, mid, &mut toggle);
        assert!(hold.progress(mid + Duration::from_millis(250)) < 100.0);

        hold.on_hold(
            HoldPhase::Ended,
            mid + Duration::from_millis(100),
            &mut toggle,
        );
        run(
            &mut hold,
            &mut toggle,
            mid + Duration::from_millis(100),
            Duration::from_secs(1),
        );
        assert!(!toggle.focused());
        assert_eq!(commits.get(), 0);
    }

    #[test]
    fn test_reversal_can_be_recaptured_by_new_hold() {
        let (mut hold, mut toggle, _) = fixtures();
        let t0 = Instant::now();

        hold.on_hold(HoldPhase::Began, t0, &mut toggle);
        let released = run(&mut hold, &mut toggle, t0, Duration::from_millis(300));
        hold.on_hold(HoldPhase::Ended, released, &mut toggle);

        // Mid-reversal, a fresh hold displaces the reversing cycle
        let regrab = run(&mut hold, &mut toggle, released, Duration::from_millis(100));
        hold.on_hold(HoldPhase::Began, regrab, &mut toggle);
        assert!(hold.is_holding());

        // And the fresh hold can still commit on its own timeline
        let late = run(&mut hold, &mut toggle, regrab, Duration::from_millis(600));
        hold.on_hold(HoldPhase::Ended, late, &mut toggle);
        run(&mut hold, &mut toggle, late, Duration::from_secs(1));
        assert!(toggle.focused());
    }
}
