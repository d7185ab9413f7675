//! Dock visibility state machine
//!
//! Hover and drag always win over occlusion. The only asynchronous piece is
//! the hide-delay timer, and there is never more than one of it pending.
//!
//! Every input that may need to hide the dock takes an `obstructed`
//! predicate: true when the dock region is covered by a window or there is
//! nothing to show. It is only called when hover and drag do not decide.

use crate::dock::timers::{TimerHandle, TimerQueue};
use crate::dock::types::DockTimer;
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Hidden,
    Revealed,
}

/// Leave-notify detail. `Inferior` means the pointer moved into a child of
/// the dock, which is not really leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingDetail {
    Normal,
    Inferior,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityState {
    pub hovering: bool,
    pub dragging: bool,
    pub always_occluded: bool,
    pub revealed: bool,
    pub occluded: bool,
    pub pending_hide_timer: Option<TimerHandle>,
}

pub struct VisibilityController {
    state: VisibilityState,
    hide_delay: Duration,
}

impl VisibilityController {
    /// Starts revealed unless the policy forces hiding; the first poll
    /// corrects it against real geometry.
    pub fn new(always_occluded: bool, hide_delay: Duration) -> Self {
        Self {
            state: VisibilityState {
                always_occluded,
                revealed: !always_occluded,
                occluded: always_occluded,
                ..VisibilityState::default()
            },
            hide_delay,
        }
    }

    pub fn state(&self) -> &VisibilityState {
        &self.state
    }

    pub fn visibility(&self) -> Visibility {
        if self.state.revealed {
            Visibility::Revealed
        } else {
            Visibility::Hidden
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.state.revealed
    }

    pub fn set_hide_delay(&mut self, delay: Duration) {
        self.hide_delay = delay;
    }

    fn cancel_hide(&mut self, timers: &mut TimerQueue<DockTimer>) {
        if let Some(handle) = self.state.pending_hide_timer.take() {
            timers.cancel(handle);
        }
    }

    fn reveal(&mut self, timers: &mut TimerQueue<DockTimer>) -> bool {
        self.cancel_hide(timers);
        if !self.state.always_occluded {
            self.state.occluded = false;
        }
        let changed = !self.state.revealed;
        self.state.revealed = true;
        changed
    }

    /// Apply the occlusion decision right now. Returns true if the
    /// visibility changed.
    fn evaluate<F: FnOnce() -> bool>(&mut self, timers: &mut TimerQueue<DockTimer>, obstructed: F) -> bool {
        if self.state.hovering || self.state.dragging {
            return self.reveal(timers);
        }
        self.cancel_hide(timers);
        let hide = self.state.always_occluded || obstructed();
        self.state.occluded = hide;
        let changed = self.state.revealed == hide;
        self.state.revealed = !hide;
        changed
    }

    pub fn hover_enter(&mut self, timers: &mut TimerQueue<DockTimer>) -> bool {
        self.state.hovering = true;
        self.reveal(timers)
    }

    /// Arms (or re-arms) the hide-delay timer. Never changes visibility by
    /// itself.
    pub fn hover_leave(
        &mut self,
        detail: CrossingDetail,
        timers: &mut TimerQueue<DockTimer>,
        now: Instant,
    ) {
        if detail == CrossingDetail::Inferior {
            return;
        }
        self.state.hovering = false;
        if self.state.dragging {
            return;
        }
        self.cancel_hide(timers);
        let handle = timers.schedule_in(now, self.hide_delay, DockTimer::HideDelay);
        self.state.pending_hide_timer = Some(handle);
    }

    pub fn drag_begin(&mut self, timers: &mut TimerQueue<DockTimer>) -> bool {
        self.state.dragging = true;
        self.reveal(timers)
    }

    /// Drag over: re-check occlusion immediately instead of waiting for the
    /// next poll
    pub fn drag_end<F: FnOnce() -> bool>(&mut self, timers: &mut TimerQueue<DockTimer>, obstructed: F) -> bool {
        self.state.dragging = false;
        self.evaluate(timers, obstructed)
    }

    /// Handle the hide-delay timer. Stale handles are ignored.
    pub fn hide_timer_fired<F: FnOnce() -> bool>(
        &mut self,
        handle: TimerHandle,
        timers: &mut TimerQueue<DockTimer>,
        obstructed: F,
    ) -> bool {
        if self.state.pending_hide_timer != Some(handle) {
            return false;
        }
        self.state.pending_hide_timer = None;
        self.evaluate(timers, obstructed)
    }

    /// Periodic re-evaluation. Left to the hide timer while one is pending.
    pub fn poll<F: FnOnce() -> bool>(&mut self, timers: &mut TimerQueue<DockTimer>, obstructed: F) -> bool {
        if self.state.pending_hide_timer.is_some() {
            return false;
        }
        self.evaluate(timers, obstructed)
    }

    pub fn set_always_occluded<F: FnOnce() -> bool>(
        &mut self,
        always_occluded: bool,
        timers: &mut TimerQueue<DockTimer>,
        obstructed: F,
    ) -> bool {
        if self.state.always_occluded == always_occluded {
            return false;
        }
        log::info!("always_occluded set to {}", always_occluded);
        self.state.always_occluded = always_occluded;
        self.evaluate(timers, obstructed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(250);

    fn make_controller(always_occluded: bool) -> (VisibilityController, TimerQueue<DockTimer>) {
        (VisibilityController::new(always_occluded, DELAY), TimerQueue::new())
    }

    /// Fire every due hide timer at `at`
    fn fire(
        vis: &mut VisibilityController,
        timers: &mut TimerQueue<DockTimer>,
        at: Instant,
        obstructed: bool,
    ) {
        for (handle, key) in timers.pop_due(at) {
            if key == DockTimer::HideDelay {
                vis.hide_timer_fired(handle, timers, || obstructed);
            }
        }
    }

    // ── hover ───────────────────────────────────────────────────────

    #[test]
    fn hovering_reveals_regardless_of_occlusion() {
        let (mut vis, mut timers) = make_controller(false);
        vis.poll(&mut timers, || true);
        assert_eq!(vis.visibility(), Visibility::Hidden);

        assert!(vis.hover_enter(&mut timers));
        assert_eq!(vis.visibility(), Visibility::Revealed);

        assert!(!vis.poll(&mut timers, || true));
        assert_eq!(vis.visibility(), Visibility::Revealed);
    }

    #[test]
    fn hovering_reveals_even_when_always_occluded() {
        let (mut vis, mut timers) = make_controller(true);
        assert_eq!(vis.visibility(), Visibility::Hidden);
        vis.hover_enter(&mut timers);
        vis.poll(&mut timers, || false);
        assert_eq!(vis.visibility(), Visibility::Revealed);
        assert!(vis.state().occluded);
    }

    #[test]
    fn hides_after_delay_when_occluded() {
        let (mut vis, mut timers) = make_controller(false);
        let now = Instant::now();
        vis.hover_enter(&mut timers);
        vis.hover_leave(CrossingDetail::Normal, &mut timers, now);

        // Still revealed before the delay elapses
        fire(&mut vis, &mut timers, now + Duration::from_millis(100), true);
        assert_eq!(vis.visibility(), Visibility::Revealed);

        fire(&mut vis, &mut timers, now + DELAY, true);
        assert_eq!(vis.visibility(), Visibility::Hidden);
        assert_eq!(vis.state().pending_hide_timer, None);
    }

    #[test]
    fn stays_revealed_after_delay_when_clear() {
        let (mut vis, mut timers) = make_controller(false);
        let now = Instant::now();
        vis.hover_enter(&mut timers);
        vis.hover_leave(CrossingDetail::Normal, &mut timers, now);
        fire(&mut vis, &mut timers, now + DELAY, false);
        assert_eq!(vis.visibility(), Visibility::Revealed);
    }

    #[test]
    fn always_occluded_hides_without_querying() {
        let (mut vis, mut timers) = make_controller(true);
        let now = Instant::now();
        vis.hover_enter(&mut timers);
        vis.hover_leave(CrossingDetail::Normal, &mut timers, now);

        let handle = vis.state().pending_hide_timer.unwrap();
        timers.pop_due(now + DELAY);
        vis.hide_timer_fired(handle, &mut timers, || panic!("geometry queried"));
        assert_eq!(vis.visibility(), Visibility::Hidden);
    }

    #[test]
    fn inferior_leave_is_ignored() {
        let (mut vis, mut timers) = make_controller(false);
        vis.hover_enter(&mut timers);
        vis.hover_leave(CrossingDetail::Inferior, &mut timers, Instant::now());
        assert!(vis.state().hovering);
        assert!(timers.is_empty());
    }

    #[test]
    fn reentering_cancels_pending_hide() {
        let (mut vis, mut timers) = make_controller(false);
        let now = Instant::now();
        vis.hover_enter(&mut timers);
        vis.hover_leave(CrossingDetail::Normal, &mut timers, now);
        vis.hover_enter(&mut timers);

        assert!(timers.is_empty());
        fire(&mut vis, &mut timers, now + DELAY, true);
        assert_eq!(vis.visibility(), Visibility::Revealed);
    }

    #[test]
    fn repeated_leave_keeps_single_timer() {
        let (mut vis, mut timers) = make_controller(false);
        let now = Instant::now();
        vis.hover_leave(CrossingDetail::Normal, &mut timers, now);
        vis.hover_leave(CrossingDetail::Normal, &mut timers, now + Duration::from_millis(100));
        assert_eq!(timers.len(), 1);

        // The first deadline passed but was re-armed
        fire(&mut vis, &mut timers, now + DELAY, true);
        assert_eq!(vis.visibility(), Visibility::Revealed);
        fire(&mut vis, &mut timers, now + DELAY + Duration::from_millis(100), true);
        assert_eq!(vis.visibility(), Visibility::Hidden);
    }

    #[test]
    fn stale_handle_ignored() {
        let (mut vis, mut timers) = make_controller(false);
        let now = Instant::now();
        vis.hover_leave(CrossingDetail::Normal, &mut timers, now);
        let stale = vis.state().pending_hide_timer.unwrap();
        vis.hover_enter(&mut timers);
        assert!(!vis.hide_timer_fired(stale, &mut timers, || true));
        assert_eq!(vis.visibility(), Visibility::Revealed);
    }

    // ── drag ────────────────────────────────────────────────────────

    #[test]
    fn dragging_blocks_hide_and_leave() {
        let (mut vis, mut timers) = make_controller(false);
        let now = Instant::now();
        vis.drag_begin(&mut timers);
        vis.hover_leave(CrossingDetail::Normal, &mut timers, now);
        assert!(timers.is_empty());
        assert!(!vis.poll(&mut timers, || true));
        assert_eq!(vis.visibility(), Visibility::Revealed);
    }

    #[test]
    fn drag_end_reevaluates_immediately() {
        let (mut vis, mut timers) = make_controller(false);
        vis.drag_begin(&mut timers);
        assert!(vis.drag_end(&mut timers, || true));
        assert_eq!(vis.visibility(), Visibility::Hidden);
    }

    #[test]
    fn drag_end_while_hovering_stays_revealed() {
        let (mut vis, mut timers) = make_controller(false);
        vis.hover_enter(&mut timers);
        vis.drag_begin(&mut timers);
        vis.drag_end(&mut timers, || true);
        assert_eq!(vis.visibility(), Visibility::Revealed);
    }

    // ── poll / policy ───────────────────────────────────────────────

    #[test]
    fn poll_tracks_geometry() {
        let (mut vis, mut timers) = make_controller(false);
        assert!(vis.poll(&mut timers, || true));
        assert_eq!(vis.visibility(), Visibility::Hidden);
        assert!(vis.poll(&mut timers, || false));
        assert_eq!(vis.visibility(), Visibility::Revealed);
        assert!(!vis.poll(&mut timers, || false));
    }

    #[test]
    fn poll_defers_to_pending_timer() {
        let (mut vis, mut timers) = make_controller(false);
        vis.hover_leave(CrossingDetail::Normal, &mut timers, Instant::now());
        assert!(!vis.poll(&mut timers, || true));
        assert_eq!(vis.visibility(), Visibility::Revealed);
    }

    #[test]
    fn policy_flip_applies_immediately() {
        let (mut vis, mut timers) = make_controller(false);
        assert!(vis.set_always_occluded(true, &mut timers, || false));
        assert_eq!(vis.visibility(), Visibility::Hidden);
        assert!(!vis.set_always_occluded(true, &mut timers, || false));
        assert!(vis.set_always_occluded(false, &mut timers, || false));
        assert_eq!(vis.visibility(), Visibility::Revealed);
    }

    #[test]
    fn policy_flip_cancels_pending_hide() {
        let (mut vis, mut timers) = make_controller(false);
        vis.hover_leave(CrossingDetail::Normal, &mut timers, Instant::now());
        vis.set_always_occluded(true, &mut timers, || false);
        assert_eq!(vis.state().pending_hide_timer, None);
        assert!(timers.is_empty());
    }
}
